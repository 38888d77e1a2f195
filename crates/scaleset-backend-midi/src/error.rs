//! Error types for the MIDI backend.

use thiserror::Error;

/// Result type for MIDI operations.
pub type MidiResult<T> = Result<T, MidiError>;

/// Errors that can occur while building, writing, or reading MIDI files.
#[derive(Debug, Error)]
pub enum MidiError {
    /// Channel outside 0-15.
    #[error("invalid MIDI channel: {channel}")]
    InvalidChannel {
        /// The invalid channel.
        channel: u8,
    },

    /// Program outside 0-127.
    #[error("invalid MIDI program: {program}")]
    InvalidProgram {
        /// The invalid program.
        program: u8,
    },

    /// Tempo of zero or too slow to encode.
    #[error("invalid tempo: {bpm} BPM")]
    InvalidTempo {
        /// The invalid tempo.
        bpm: u16,
    },

    /// Time signature with a zero numerator or a non power-of-two denominator.
    #[error("invalid time signature: {numerator}/{denominator}")]
    InvalidTimeSignature {
        /// Beats per bar.
        numerator: u8,
        /// Beat unit.
        denominator: u8,
    },

    /// Note with an end beat not after its start beat, or a pitch above 127.
    #[error("invalid note at beat {start_beat}: {message}")]
    InvalidNote {
        /// Start beat of the note.
        start_beat: u32,
        /// What is wrong with it.
        message: String,
    },

    /// Bytes could not be parsed as a Standard MIDI File.
    #[error("failed to parse MIDI: {0}")]
    Parse(String),

    /// File uses SMPTE timecode, which is not supported.
    #[error("unsupported MIDI timing: {0}")]
    UnsupportedTiming(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MidiError {
    /// Returns the error code string (e.g., "MIDI_001").
    pub fn code(&self) -> &'static str {
        match self {
            MidiError::InvalidChannel { .. } => "MIDI_001",
            MidiError::InvalidProgram { .. } => "MIDI_002",
            MidiError::InvalidTempo { .. } => "MIDI_003",
            MidiError::InvalidTimeSignature { .. } => "MIDI_004",
            MidiError::InvalidNote { .. } => "MIDI_005",
            MidiError::Parse(_) => "MIDI_006",
            MidiError::UnsupportedTiming(_) => "MIDI_007",
            MidiError::Io(_) => "MIDI_008",
        }
    }
}

impl From<midly::Error> for MidiError {
    fn from(err: midly::Error) -> Self {
        MidiError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_messages() {
        let err = MidiError::InvalidChannel { channel: 16 };
        assert_eq!(err.code(), "MIDI_001");
        assert_eq!(err.to_string(), "invalid MIDI channel: 16");

        let err = MidiError::InvalidTimeSignature {
            numerator: 3,
            denominator: 5,
        };
        assert!(err.to_string().contains("3/5"));
    }
}
