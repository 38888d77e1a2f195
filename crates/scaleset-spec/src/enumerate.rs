//! Row enumeration over keys, play directions, and instruments.
//!
//! The enumeration order is a contract: keys outermost (input order), then
//! play directions (declaration order), then instruments (input order).
//! Indices start at 0 and increase by one per row with no gaps, so row
//! indices are stable across runs with the same inputs.

use std::collections::HashSet;

use crate::error::EnumerationError;
use crate::instrument::InstrumentDescriptor;
use crate::melody::PlayDirection;
use crate::row::ParameterRow;
use crate::scale::Key;

/// Lazy, single-pass generator of [`ParameterRow`]s.
///
/// Replaying the enumeration requires a fresh key iterator; the enumerator
/// itself does not buffer keys.
#[derive(Debug, Clone)]
pub struct RowEnumerator<K> {
    keys: K,
    instruments: Vec<InstrumentDescriptor>,
    current_key: Option<Key>,
    direction_idx: usize,
    instrument_idx: usize,
    next_index: usize,
}

impl<K> RowEnumerator<K>
where
    K: Iterator<Item = Key>,
{
    /// Creates an enumerator without validating its inputs.
    pub fn new<I>(keys: I, instruments: Vec<InstrumentDescriptor>) -> Self
    where
        I: IntoIterator<IntoIter = K>,
    {
        Self {
            keys: keys.into_iter(),
            instruments,
            current_key: None,
            direction_idx: 0,
            instrument_idx: 0,
            next_index: 0,
        }
    }

    /// Number of rows produced per key.
    fn rows_per_key(&self) -> usize {
        PlayDirection::ALL.len() * self.instruments.len()
    }

    /// Rows still to come from the key currently being expanded.
    fn remaining_in_current_key(&self) -> usize {
        if self.current_key.is_none() || self.direction_idx >= PlayDirection::ALL.len() {
            return 0;
        }
        (PlayDirection::ALL.len() - self.direction_idx) * self.instruments.len()
            - self.instrument_idx
    }
}

impl RowEnumerator<std::vec::IntoIter<Key>> {
    /// Validates keys and instruments, then creates an enumerator.
    ///
    /// Rejects malformed instruments, repeated keys, and instruments whose
    /// (program, sanitized name) pair repeats, since either repetition would
    /// make two rows share file names.
    pub fn checked(
        keys: Vec<Key>,
        instruments: Vec<InstrumentDescriptor>,
    ) -> Result<Self, EnumerationError> {
        validate_inputs(&keys, &instruments)?;
        Ok(Self::new(keys, instruments))
    }
}

impl<K> Iterator for RowEnumerator<K>
where
    K: Iterator<Item = Key>,
{
    type Item = ParameterRow;

    fn next(&mut self) -> Option<ParameterRow> {
        if self.instruments.is_empty() {
            return None;
        }

        loop {
            if let Some(key) = self.current_key {
                if self.direction_idx < PlayDirection::ALL.len() {
                    let row = ParameterRow {
                        index: self.next_index,
                        key,
                        direction: PlayDirection::ALL[self.direction_idx],
                        instrument: self.instruments[self.instrument_idx].clone(),
                    };

                    self.next_index += 1;
                    self.instrument_idx += 1;
                    if self.instrument_idx == self.instruments.len() {
                        self.instrument_idx = 0;
                        self.direction_idx += 1;
                    }
                    return Some(row);
                }
            }

            self.current_key = Some(self.keys.next()?);
            self.direction_idx = 0;
            self.instrument_idx = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.instruments.is_empty() {
            return (0, Some(0));
        }
        let per_key = self.rows_per_key();
        let current = self.remaining_in_current_key();
        let (low, high) = self.keys.size_hint();
        let low = low.saturating_mul(per_key).saturating_add(current);
        let high = high
            .and_then(|h| h.checked_mul(per_key))
            .and_then(|h| h.checked_add(current));
        (low, high)
    }
}

/// Checks that every instrument is well formed and that no key or
/// instrument repeats.
pub fn validate_inputs(
    keys: &[Key],
    instruments: &[InstrumentDescriptor],
) -> Result<(), EnumerationError> {
    let mut seen_keys = HashSet::new();
    for key in keys {
        if !seen_keys.insert(*key) {
            return Err(EnumerationError::DuplicateKey {
                root: key.root.name().to_string(),
                mode: key.mode.name().to_string(),
            });
        }
    }

    let mut seen_instruments = HashSet::new();
    for instrument in instruments {
        instrument.validate()?;
        let sanitized = instrument.sanitized_name();
        if !seen_instruments.insert((instrument.program, sanitized.clone())) {
            return Err(EnumerationError::DuplicateInstrument {
                program: instrument.program,
                name: sanitized,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::default_instruments;
    use crate::scale::{all_keys, Mode};
    use pretty_assertions::assert_eq;

    fn summary(rows: &[ParameterRow]) -> Vec<(usize, String, &'static str, u8)> {
        rows.iter()
            .map(|r| {
                (
                    r.index,
                    r.key.root.name().to_string(),
                    r.direction_label(),
                    r.instrument.program,
                )
            })
            .collect()
    }

    #[test]
    fn test_two_keys_one_instrument_order() {
        let keys = vec![
            Key::parse("C", "ionian").unwrap(),
            Key::parse("D", "ionian").unwrap(),
        ];
        let rows: Vec<ParameterRow> = RowEnumerator::new(keys, default_instruments()).collect();

        assert_eq!(
            summary(&rows),
            vec![
                (0, "C".to_string(), "ASCENDING", 0),
                (1, "C".to_string(), "DESCENDING", 0),
                (2, "D".to_string(), "ASCENDING", 0),
                (3, "D".to_string(), "DESCENDING", 0),
            ]
        );
    }

    #[test]
    fn test_instruments_are_innermost() {
        let keys = vec![Key::parse("E", "aeolian").unwrap()];
        let instruments = vec![
            InstrumentDescriptor::general_midi(0).unwrap(),
            InstrumentDescriptor::general_midi(40).unwrap(),
        ];
        let rows: Vec<ParameterRow> = RowEnumerator::new(keys, instruments).collect();

        assert_eq!(
            summary(&rows),
            vec![
                (0, "E".to_string(), "ASCENDING", 0),
                (1, "E".to_string(), "ASCENDING", 40),
                (2, "E".to_string(), "DESCENDING", 0),
                (3, "E".to_string(), "DESCENDING", 40),
            ]
        );
    }

    #[test]
    fn test_full_catalog_count_and_contiguous_indices() {
        let rows: Vec<ParameterRow> =
            RowEnumerator::new(all_keys(Mode::Ionian), default_instruments()).collect();
        assert_eq!(rows.len(), 24);
        for (expected, row) in rows.iter().enumerate() {
            assert_eq!(row.index, expected);
        }
    }

    #[test]
    fn test_base_filenames_are_unique() {
        let keys: Vec<Key> = Mode::ALL.into_iter().flat_map(all_keys).collect();
        let instruments: Vec<InstrumentDescriptor> = [0u8, 24, 40, 73]
            .into_iter()
            .map(|p| InstrumentDescriptor::general_midi(p).unwrap())
            .collect();
        let rows: Vec<ParameterRow> = RowEnumerator::checked(keys, instruments)
            .unwrap()
            .collect();

        let names: HashSet<String> = rows.iter().map(|r| r.base_filename()).collect();
        assert_eq!(names.len(), rows.len());
    }

    #[test]
    fn test_empty_inputs_yield_nothing() {
        let mut no_instruments = RowEnumerator::new(all_keys(Mode::Ionian), Vec::new());
        assert_eq!(no_instruments.size_hint(), (0, Some(0)));
        assert!(no_instruments.next().is_none());

        let no_keys = RowEnumerator::new(Vec::<Key>::new(), default_instruments());
        assert_eq!(no_keys.count(), 0);
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut rows = RowEnumerator::new(all_keys(Mode::Ionian), default_instruments());
        assert_eq!(rows.size_hint(), (24, Some(24)));
        rows.next();
        assert_eq!(rows.size_hint(), (23, Some(23)));
        rows.next();
        rows.next();
        assert_eq!(rows.size_hint(), (21, Some(21)));
    }

    #[test]
    fn test_lazy_over_single_use_iterator() {
        let keys = all_keys(Mode::Lydian).into_iter().take(2);
        let rows = RowEnumerator::new(keys, default_instruments());
        assert_eq!(rows.map(|r| r.index).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_checked_rejects_duplicate_key() {
        let key = Key::parse("C", "ionian").unwrap();
        let err = RowEnumerator::checked(vec![key, key], default_instruments()).unwrap_err();
        assert_eq!(
            err,
            EnumerationError::DuplicateKey {
                root: "C".to_string(),
                mode: "ionian".to_string()
            }
        );
    }

    #[test]
    fn test_checked_rejects_colliding_instruments() {
        let a = InstrumentDescriptor::new(5, "Bright Piano", "Piano").unwrap();
        let b = InstrumentDescriptor::new(5, "Bright_Piano", "Keys").unwrap();
        let err = RowEnumerator::checked(all_keys(Mode::Ionian), vec![a, b]).unwrap_err();
        assert!(matches!(
            err,
            EnumerationError::DuplicateInstrument { program: 5, .. }
        ));
    }

    #[test]
    fn test_checked_rejects_malformed_instrument() {
        let bad = InstrumentDescriptor {
            program: 3,
            name: String::new(),
            category: "Piano".to_string(),
        };
        let err = RowEnumerator::checked(all_keys(Mode::Ionian), vec![bad]).unwrap_err();
        assert!(matches!(
            err,
            EnumerationError::MissingInstrumentField { field: "name", .. }
        ));
    }
}
