//! Error types for the dataset pipeline.

use std::path::PathBuf;

use scaleset_backend_audio::AudioError;
use scaleset_backend_midi::MidiError;
use scaleset_spec::{EnumerationError, MelodyError};
use thiserror::Error;

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Failure while synthesizing a single row.
///
/// Row errors never stop other rows; the pipeline records them and, under
/// the abort policy, stops dispatching.
#[derive(Debug, Error)]
pub enum RowError {
    /// Melody could not be built.
    #[error("melody: {0}")]
    Melody(#[from] MelodyError),

    /// MIDI track could not be built or written.
    #[error("MIDI: {0}")]
    Midi(#[from] MidiError),

    /// Audio render failed.
    #[error("render: {0}")]
    Render(AudioError),

    /// Silence detection failed.
    #[error("silence check: {0}")]
    Silence(AudioError),

    /// The processor panicked while handling the row.
    #[error("processor panicked: {message}")]
    Panicked {
        /// Panic payload, if it was a string.
        message: String,
    },

    /// Any other processor failure.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl RowError {
    /// Creates an uncategorized row error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Returns the error code string, delegating to the underlying backend.
    pub fn code(&self) -> &'static str {
        match self {
            RowError::Melody(e) => e.code().code(),
            RowError::Midi(e) => e.code(),
            RowError::Render(e) | RowError::Silence(e) => e.code(),
            RowError::Other { .. } => "ROW_001",
            RowError::Panicked { .. } => "ROW_002",
        }
    }
}

/// Errors that stop a whole dataset run.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Key or instrument input is malformed.
    #[error("invalid dataset input: {0}")]
    Enumeration(#[from] EnumerationError),

    /// Configuration value is out of range.
    #[error("invalid config '{field}': {message}")]
    InvalidConfig {
        /// Field name.
        field: &'static str,
        /// Error message.
        message: String,
    },

    /// Config file could not be read or parsed.
    #[error("failed to load config '{path}': {message}")]
    ConfigLoad {
        /// Config path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Renderer could not be constructed.
    #[error("failed to set up renderer: {0}")]
    Renderer(AudioError),

    /// Dataset directory could not be created.
    #[error("failed to create dataset directory '{path}': {source}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Dataset directory exists but files cannot be created in it.
    #[error("dataset directory '{path}' is not writable: {source}")]
    DirNotWritable {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Worker pool could not be built.
    #[error("failed to start worker pool: {message}")]
    WorkerPool {
        /// Error message.
        message: String,
    },

    /// A row failed under the abort policy.
    #[error("row {index} ({base_filename}) failed: {message}")]
    Aborted {
        /// Index of the first failed row.
        index: usize,
        /// Base file name of the failed row.
        base_filename: String,
        /// Error message.
        message: String,
    },

    /// Report could not be written or read.
    #[error("report file '{path}': {message}")]
    Report {
        /// Report path.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}

impl DatasetError {
    /// Returns the error code string (e.g., "DATASET_001").
    pub fn code(&self) -> &'static str {
        match self {
            DatasetError::Enumeration(_) => "DATASET_001",
            DatasetError::InvalidConfig { .. } => "DATASET_002",
            DatasetError::ConfigLoad { .. } => "DATASET_003",
            DatasetError::Renderer(_) => "DATASET_004",
            DatasetError::CreateDir { .. } => "DATASET_005",
            DatasetError::WorkerPool { .. } => "DATASET_006",
            DatasetError::Aborted { .. } => "DATASET_007",
            DatasetError::Report { .. } => "DATASET_008",
            DatasetError::DirNotWritable { .. } => "DATASET_009",
        }
    }

    pub(crate) fn report(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::Report {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
