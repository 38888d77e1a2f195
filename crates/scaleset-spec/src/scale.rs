//! Scale catalog and key projection.
//!
//! A [`Key`] pairs a root pitch class with a [`Mode`]. Projecting a key
//! yields its ordered pitch classes (root first) and the MIDI pitch of its
//! tonic, which is everything the melody builder needs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EnumerationError;
use crate::pitch::PitchClass;

/// Circle-of-fifths position of each major key, indexed by tonic pitch class.
/// Positive values are sharps, negative values are flats.
const MAJOR_KEY_ACCIDENTALS: [i8; 12] = [0, 7, 2, -3, 4, -1, 6, 1, -4, 3, -2, 5];

/// Scale modes recognized by the scale lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    /// Major scale.
    Ionian,
    /// Minor with raised 6th.
    Dorian,
    /// Minor with lowered 2nd.
    Phrygian,
    /// Major with raised 4th.
    Lydian,
    /// Major with lowered 7th.
    Mixolydian,
    /// Natural minor.
    Aeolian,
    /// Diminished 5th above the root.
    Locrian,
    /// Natural minor with raised 7th.
    HarmonicMinor,
    /// Natural minor with raised 6th and 7th (ascending form).
    MelodicMinor,
    /// Five-note major scale.
    MajorPentatonic,
    /// Five-note minor scale.
    MinorPentatonic,
}

impl Mode {
    /// Every mode in catalog order.
    pub const ALL: [Mode; 11] = [
        Mode::Ionian,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Aeolian,
        Mode::Locrian,
        Mode::HarmonicMinor,
        Mode::MelodicMinor,
        Mode::MajorPentatonic,
        Mode::MinorPentatonic,
    ];

    /// Canonical lowercase name, used in file names and reports.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Ionian => "ionian",
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
            Mode::Mixolydian => "mixolydian",
            Mode::Aeolian => "aeolian",
            Mode::Locrian => "locrian",
            Mode::HarmonicMinor => "harmonic_minor",
            Mode::MelodicMinor => "melodic_minor",
            Mode::MajorPentatonic => "major_pentatonic",
            Mode::MinorPentatonic => "minor_pentatonic",
        }
    }

    /// Semitone intervals from the root to each scale degree.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            Mode::Ionian => &[0, 2, 4, 5, 7, 9, 11],
            Mode::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Mode::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Mode::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Mode::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Mode::Aeolian => &[0, 2, 3, 5, 7, 8, 10],
            Mode::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            Mode::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            Mode::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            Mode::MajorPentatonic => &[0, 2, 4, 7, 9],
            Mode::MinorPentatonic => &[0, 3, 5, 7, 10],
        }
    }

    /// Semitones from the relative major's tonic up to this mode's root.
    fn offset_from_relative_major(self) -> u8 {
        match self {
            Mode::Ionian | Mode::MajorPentatonic => 0,
            Mode::Dorian => 2,
            Mode::Phrygian => 4,
            Mode::Lydian => 5,
            Mode::Mixolydian => 7,
            Mode::Aeolian | Mode::HarmonicMinor | Mode::MelodicMinor | Mode::MinorPentatonic => 9,
            Mode::Locrian => 11,
        }
    }

    /// Whether the key signature should be marked minor.
    fn is_minor(self) -> bool {
        matches!(
            self,
            Mode::Aeolian | Mode::HarmonicMinor | Mode::MelodicMinor | Mode::MinorPentatonic
        )
    }

    /// Parse a mode name (case-insensitive; `major` and `minor` are aliases).
    pub fn parse(name: &str) -> Result<Self, EnumerationError> {
        let normalized = name.trim().to_lowercase().replace(['-', ' '], "_");
        let mode = match normalized.as_str() {
            "major" => Mode::Ionian,
            "minor" | "natural_minor" => Mode::Aeolian,
            other => Mode::ALL
                .into_iter()
                .find(|m| m.name() == other)
                .ok_or_else(|| EnumerationError::UnknownMode {
                    name: name.to_string(),
                })?,
        };
        Ok(mode)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = EnumerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Mode {
    type Error = EnumerationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.name().to_string()
    }
}

/// MIDI key signature: accidental count and major/minor flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySignature {
    /// Sharps (positive) or flats (negative), -7..=7.
    pub accidentals: i8,
    /// Whether the key is minor.
    pub minor: bool,
}

/// A musical key: root pitch class plus mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    /// Tonic pitch class.
    pub root: PitchClass,
    /// Scale mode.
    pub mode: Mode,
}

impl Key {
    /// Creates a key.
    pub fn new(root: PitchClass, mode: Mode) -> Self {
        Self { root, mode }
    }

    /// Parse a key from root note and mode names.
    pub fn parse(root: &str, mode: &str) -> Result<Self, EnumerationError> {
        Ok(Self {
            root: PitchClass::parse(root)?,
            mode: Mode::parse(mode)?,
        })
    }

    /// Ordered pitch classes of the scale, root first.
    ///
    /// Values wrap past B, so `G ionian` yields `[7, 9, 11, 0, 2, 4, 6]`.
    pub fn pitch_classes(&self) -> Vec<u8> {
        self.mode
            .intervals()
            .iter()
            .map(|interval| (self.root.value() + interval) % 12)
            .collect()
    }

    /// MIDI pitch of the tonic.
    pub fn tonic_midi_pitch(&self) -> u8 {
        self.root.tonic_midi_pitch()
    }

    /// Key signature taken from the relative major of this key.
    ///
    /// # Examples
    /// ```
    /// use scaleset_spec::Key;
    ///
    /// let key = Key::parse("A", "aeolian").unwrap();
    /// let sig = key.key_signature();
    /// assert_eq!(sig.accidentals, 0);
    /// assert!(sig.minor);
    /// ```
    pub fn key_signature(&self) -> KeySignature {
        let offset = self.mode.offset_from_relative_major();
        let relative_major = (self.root.value() + 12 - offset) % 12;
        KeySignature {
            accidentals: MAJOR_KEY_ACCIDENTALS[relative_major as usize],
            minor: self.mode.is_minor(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.mode)
    }
}

/// Build keys from root and mode name lists, roots outermost.
///
/// # Arguments
/// * `roots` - Root note names, in enumeration order
/// * `modes` - Mode names, in enumeration order
///
/// # Returns
/// One key per (root, mode) pair, or the first name that failed to parse
pub fn keys_from_names<R, M>(roots: &[R], modes: &[M]) -> Result<Vec<Key>, EnumerationError>
where
    R: AsRef<str>,
    M: AsRef<str>,
{
    let modes = modes
        .iter()
        .map(|m| Mode::parse(m.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut keys = Vec::with_capacity(roots.len() * modes.len());
    for root in roots {
        let root = PitchClass::parse(root.as_ref())?;
        for &mode in &modes {
            keys.push(Key::new(root, mode));
        }
    }
    Ok(keys)
}

/// All twelve chromatic roots in a single mode.
pub fn all_keys(mode: Mode) -> Vec<Key> {
    PitchClass::ALL
        .into_iter()
        .map(|root| Key::new(root, mode))
        .collect()
}
