//! Dataset rows: what to synthesize, and what was synthesized.

use serde::{Deserialize, Serialize};

use crate::instrument::InstrumentDescriptor;
use crate::melody::PlayDirection;
use crate::scale::Key;

/// File extension for MIDI artifacts.
pub const MIDI_EXTENSION: &str = "mid";

/// File extension for rendered audio artifacts.
pub const AUDIO_EXTENSION: &str = "wav";

/// One combination of key, direction, and instrument to synthesize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterRow {
    /// Position in enumeration order, unique within a run.
    pub index: usize,
    /// Root note and mode.
    pub key: Key,
    /// Play direction.
    pub direction: PlayDirection,
    /// Instrument to render with.
    pub instrument: InstrumentDescriptor,
}

impl ParameterRow {
    /// Label of the play direction (e.g., "ASCENDING").
    pub fn direction_label(&self) -> &'static str {
        self.direction.label()
    }

    /// Canonical base file name shared by the row's MIDI and audio files.
    ///
    /// The (root, mode, direction, program, instrument name) tuple is unique
    /// per row, so names never collide within a run.
    ///
    /// # Examples
    /// ```
    /// use scaleset_spec::{InstrumentDescriptor, Key, ParameterRow, PlayDirection};
    ///
    /// let row = ParameterRow {
    ///     index: 0,
    ///     key: Key::parse("C#", "ionian").unwrap(),
    ///     direction: PlayDirection::Descending,
    ///     instrument: InstrumentDescriptor::general_midi(0).unwrap(),
    /// };
    /// assert_eq!(
    ///     row.base_filename(),
    ///     "C#_ionian_DESCENDING_0_Acoustic_Grand_Piano"
    /// );
    /// ```
    pub fn base_filename(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}",
            self.key.root,
            self.key.mode,
            self.direction_label(),
            self.instrument.program,
            self.instrument.sanitized_name()
        )
    }

    /// MIDI file name for this row.
    pub fn midi_filename(&self) -> String {
        format!("{}.{}", self.base_filename(), MIDI_EXTENSION)
    }

    /// Audio file name for this row.
    pub fn audio_filename(&self) -> String {
        format!("{}.{}", self.base_filename(), AUDIO_EXTENSION)
    }
}

/// Metadata recorded for one synthesized row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Index of the parameter row this came from.
    pub index: usize,
    /// Root note name.
    pub key_root_note: String,
    /// Mode name.
    pub key_mode: String,
    /// Play direction label.
    pub play_style: String,
    /// MIDI program number.
    pub midi_program_num: u8,
    /// Instrument display name.
    pub midi_program_name: String,
    /// Instrument category.
    pub midi_category: String,
    /// MIDI file path relative to the dataset directory.
    pub midi_file_path: String,
    /// Audio file path relative to the dataset directory.
    pub synth_file_path: String,
    /// File name of the soundfont used for rendering.
    pub synth_soundfont: String,
    /// Whether the rendered audio is silent.
    pub is_silent: bool,
}

impl ResultRow {
    /// Column names in serialization order.
    pub const COLUMNS: [&'static str; 11] = [
        "index",
        "key_root_note",
        "key_mode",
        "play_style",
        "midi_program_num",
        "midi_program_name",
        "midi_category",
        "midi_file_path",
        "synth_file_path",
        "synth_soundfont",
        "is_silent",
    ];

    /// Builds the result row for a parameter row.
    ///
    /// Paths are the row's file names, which are relative to the dataset
    /// directory.
    pub fn for_row(row: &ParameterRow, soundfont: impl Into<String>, is_silent: bool) -> Self {
        Self {
            index: row.index,
            key_root_note: row.key.root.name().to_string(),
            key_mode: row.key.mode.name().to_string(),
            play_style: row.direction_label().to_string(),
            midi_program_num: row.instrument.program,
            midi_program_name: row.instrument.name.clone(),
            midi_category: row.instrument.category.clone(),
            midi_file_path: row.midi_filename(),
            synth_file_path: row.audio_filename(),
            synth_soundfont: soundfont.into(),
            is_silent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_row() -> ParameterRow {
        ParameterRow {
            index: 7,
            key: Key::parse("F#", "dorian").unwrap(),
            direction: PlayDirection::Ascending,
            instrument: InstrumentDescriptor::general_midi(41).unwrap(),
        }
    }

    #[test]
    fn test_file_names() {
        let row = sample_row();
        assert_eq!(row.base_filename(), "F#_dorian_ASCENDING_41_Viola");
        assert_eq!(row.midi_filename(), "F#_dorian_ASCENDING_41_Viola.mid");
        assert_eq!(row.audio_filename(), "F#_dorian_ASCENDING_41_Viola.wav");
    }

    #[test]
    fn test_result_row_for_row() {
        let result = ResultRow::for_row(&sample_row(), "FluidR3_GM.sf2", false);
        assert_eq!(
            result,
            ResultRow {
                index: 7,
                key_root_note: "F#".to_string(),
                key_mode: "dorian".to_string(),
                play_style: "ASCENDING".to_string(),
                midi_program_num: 41,
                midi_program_name: "Viola".to_string(),
                midi_category: "Strings".to_string(),
                midi_file_path: "F#_dorian_ASCENDING_41_Viola.mid".to_string(),
                synth_file_path: "F#_dorian_ASCENDING_41_Viola.wav".to_string(),
                synth_soundfont: "FluidR3_GM.sf2".to_string(),
                is_silent: false,
            }
        );
    }

    #[test]
    fn test_result_row_columns_match_serialization() {
        let result = ResultRow::for_row(&sample_row(), "builtin-sine", true);
        let value = serde_json::to_value(&result).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), ResultRow::COLUMNS.len());
        for column in ResultRow::COLUMNS {
            assert!(object.contains_key(column), "missing column {}", column);
        }
    }

    #[test]
    fn test_parameter_row_serializes_direction_label() {
        let value = serde_json::to_value(sample_row()).unwrap();
        assert_eq!(value["direction"], "ASCENDING");
        assert_eq!(value["key"]["root"], "F#");
        assert_eq!(value["key"]["mode"], "dorian");
    }
}
