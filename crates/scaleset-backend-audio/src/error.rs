//! Error types for the audio backend.

use std::path::PathBuf;

use scaleset_backend_midi::MidiError;
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while rendering or analyzing audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// SoundFont could not be opened or parsed.
    #[error("failed to load soundfont '{path}': {message}")]
    SoundFont {
        /// Path of the soundfont.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// MIDI input could not be read.
    #[error("failed to read MIDI '{path}': {message}")]
    MidiInput {
        /// Path of the MIDI file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// WAV encoding or decoding failed.
    #[error("WAV error for '{path}': {message}")]
    Wav {
        /// Path of the WAV file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Internal synthesis error.
    #[error("synthesis error: {message}")]
    Synthesis {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a WAV error for a path.
    pub fn wav(path: impl Into<PathBuf>, err: hound::Error) -> Self {
        Self::Wav {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Creates a MIDI input error for a path.
    pub fn midi(path: impl Into<PathBuf>, err: MidiError) -> Self {
        Self::MidiInput {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Returns the error code string (e.g., "AUDIO_001").
    pub fn code(&self) -> &'static str {
        match self {
            AudioError::SoundFont { .. } => "AUDIO_001",
            AudioError::MidiInput { .. } => "AUDIO_002",
            AudioError::InvalidSampleRate { .. } => "AUDIO_003",
            AudioError::InvalidParameter { .. } => "AUDIO_004",
            AudioError::Wav { .. } => "AUDIO_005",
            AudioError::Synthesis { .. } => "AUDIO_006",
            AudioError::Io(_) => "AUDIO_007",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AudioError::InvalidSampleRate { rate: 0 }.code(), "AUDIO_003");
        assert_eq!(AudioError::invalid_param("tail", "negative").code(), "AUDIO_004");
        let err = AudioError::midi("a.mid", MidiError::Parse("bad header".to_string()));
        assert_eq!(err.code(), "AUDIO_002");
        assert!(err.to_string().contains("a.mid"));
    }
}
