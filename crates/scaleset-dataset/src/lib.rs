//! Scaleset Dataset Pipeline
//!
//! Turns enumerated parameter rows into a dataset directory of MIDI files,
//! rendered WAV files, and a metadata report.
//!
//! # Overview
//!
//! - [`RowSynthesizer`] processes one [`ParameterRow`](scaleset_spec::ParameterRow):
//!   it builds the melody, writes the `.mid`, renders the `.wav`, and checks
//!   for silence.
//! - [`DatasetWriter`] runs any [`RowProcessor`] over a row source on a
//!   bounded worker pool and writes `metadata.json` / `metadata.csv`.
//! - [`DatasetConfig`] gathers every run parameter; [`generate_dataset`] wires
//!   it all together.
//!
//! # Example
//!
//! ```no_run
//! use scaleset_dataset::{generate_dataset, DatasetConfig};
//!
//! let config = DatasetConfig::default();
//! let report = generate_dataset(&config).unwrap();
//! println!("{} rows, {} silent", report.rows.len(), report.silent_count);
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod synthesizer;
pub mod writer;

pub use config::{
    resolve_soundfont, DatasetConfig, FailurePolicy, DEFAULT_DATASET_NAME, DEFAULT_OUT_ROOT,
    DEFAULT_WORKERS, SOUNDFONT_ENV,
};
pub use error::{DatasetError, DatasetResult, RowError};
pub use report::{
    count_silent, rows_to_csv, silence_warning, DatasetReport, RowFailure, METADATA_CSV,
    METADATA_JSON,
};
pub use synthesizer::{RowProcessor, RowSynthesizer};
pub use writer::{generate_dataset, plan_rows, DatasetWriter};
