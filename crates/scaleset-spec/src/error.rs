//! Error types for key, instrument, and melody validation.

use thiserror::Error;

/// Error codes for enumeration and melody errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Enumeration errors (E001-E009)
    /// E001: Root note name not recognized
    UnknownRootNote,
    /// E002: Mode name not recognized
    UnknownMode,
    /// E003: Instrument program outside 0-127
    ProgramOutOfRange,
    /// E004: Required instrument field missing or empty
    MissingInstrumentField,
    /// E005: Same key listed twice
    DuplicateKey,
    /// E006: Two instruments map to the same file name
    DuplicateInstrument,
    /// E007: Instrument name contains a path separator
    InvalidInstrumentName,

    // Melody errors (E010-E019)
    /// E010: Scale has no pitch classes
    EmptyScale,
    /// E011: Melody pitch above MIDI 127
    PitchOutOfRange,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnknownRootNote => "E001",
            ErrorCode::UnknownMode => "E002",
            ErrorCode::ProgramOutOfRange => "E003",
            ErrorCode::MissingInstrumentField => "E004",
            ErrorCode::DuplicateKey => "E005",
            ErrorCode::DuplicateInstrument => "E006",
            ErrorCode::InvalidInstrumentName => "E007",
            ErrorCode::EmptyScale => "E010",
            ErrorCode::PitchOutOfRange => "E011",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Malformed key or instrument input, raised before any row is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    /// Root note name could not be parsed.
    #[error("unknown root note '{name}'")]
    UnknownRootNote {
        /// The offending name.
        name: String,
    },

    /// Mode name is not in the scale catalog.
    #[error("unknown mode '{name}'")]
    UnknownMode {
        /// The offending name.
        name: String,
    },

    /// MIDI program number is outside 0-127.
    #[error("instrument '{name}' has program {program}, expected 0-127")]
    ProgramOutOfRange {
        /// Instrument display name.
        name: String,
        /// The invalid program.
        program: u8,
    },

    /// A required instrument field is empty.
    #[error("instrument with program {program} is missing '{field}'")]
    MissingInstrumentField {
        /// Instrument program.
        program: u8,
        /// Name of the empty field.
        field: &'static str,
    },

    /// The same key appears twice in the key list.
    #[error("key {root} {mode} is listed more than once")]
    DuplicateKey {
        /// Root note name.
        root: String,
        /// Mode name.
        mode: String,
    },

    /// Two instruments would produce the same file names.
    #[error("instrument {program} '{name}' is listed more than once")]
    DuplicateInstrument {
        /// Instrument program.
        program: u8,
        /// Sanitized instrument name.
        name: String,
    },

    /// Instrument name would not form a flat file name.
    #[error("instrument {program} name '{name}' contains a path separator")]
    InvalidInstrumentName {
        /// Instrument program.
        program: u8,
        /// The offending name.
        name: String,
    },
}

impl EnumerationError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EnumerationError::UnknownRootNote { .. } => ErrorCode::UnknownRootNote,
            EnumerationError::UnknownMode { .. } => ErrorCode::UnknownMode,
            EnumerationError::ProgramOutOfRange { .. } => ErrorCode::ProgramOutOfRange,
            EnumerationError::MissingInstrumentField { .. } => ErrorCode::MissingInstrumentField,
            EnumerationError::DuplicateKey { .. } => ErrorCode::DuplicateKey,
            EnumerationError::DuplicateInstrument { .. } => ErrorCode::DuplicateInstrument,
            EnumerationError::InvalidInstrumentName { .. } => ErrorCode::InvalidInstrumentName,
        }
    }
}

/// Errors raised while turning a scale into a melody.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MelodyError {
    /// No pitch classes were supplied.
    #[error("scale has no pitch classes")]
    EmptyScale,

    /// Tonic plus offset does not fit in a MIDI note.
    #[error("pitch {tonic} + {offset} exceeds MIDI note 127")]
    PitchOutOfRange {
        /// Tonic MIDI pitch.
        tonic: u8,
        /// Offset in semitones above the tonic.
        offset: u8,
    },
}

impl MelodyError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MelodyError::EmptyScale => ErrorCode::EmptyScale,
            MelodyError::PitchOutOfRange { .. } => ErrorCode::PitchOutOfRange,
        }
    }
}
