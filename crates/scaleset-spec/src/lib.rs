//! Scaleset Spec Library
//!
//! Types and pure functions for building a labeled dataset of scale
//! performances. Nothing in this crate touches the filesystem.
//!
//! # Overview
//!
//! - A [`Key`] (root + [`Mode`]) projects to ordered pitch classes and a tonic pitch.
//! - [`build_melody`] turns those into one-beat [`TimedNote`]s, ascending or descending.
//! - [`RowEnumerator`] walks keys × [`PlayDirection`]s × instruments in a fixed order,
//!   producing indexed [`ParameterRow`]s.
//! - [`ResultRow`] is the metadata schema recorded for each synthesized row.
//!
//! # Example
//!
//! ```
//! use scaleset_spec::{all_keys, default_instruments, Mode, RowEnumerator};
//!
//! let rows: Vec<_> = RowEnumerator::checked(all_keys(Mode::Ionian), default_instruments())
//!     .unwrap()
//!     .collect();
//! assert_eq!(rows.len(), 24);
//! assert_eq!(rows[1].base_filename(), "C_ionian_DESCENDING_0_Acoustic_Grand_Piano");
//! ```
//!
//! # Modules
//!
//! - [`error`]: Enumeration and melody errors with stable codes
//! - [`pitch`]: Pitch class parsing and naming
//! - [`scale`]: Mode catalog, keys, and key signatures
//! - [`instrument`]: Instrument descriptors and the General MIDI catalog
//! - [`melody`]: Play direction and timed-note melody construction
//! - [`row`]: Parameter and result row types
//! - [`enumerate`]: Deterministic row enumeration

pub mod enumerate;
pub mod error;
pub mod instrument;
pub mod melody;
pub mod pitch;
pub mod row;
pub mod scale;

// Re-export commonly used types at the crate root
pub use enumerate::{validate_inputs, RowEnumerator};
pub use error::{EnumerationError, ErrorCode, MelodyError};
pub use instrument::{
    default_instruments, sanitize_name, InstrumentDescriptor, GM_CATEGORIES, GM_PROGRAM_NAMES,
    MAX_PROGRAM,
};
pub use melody::{build_melody, key_melody, pitch_offsets, PlayDirection, TimedNote, NOTE_BEATS};
pub use pitch::{PitchClass, PITCH_CLASS_NAMES_SHARP};
pub use row::{ParameterRow, ResultRow, AUDIO_EXTENSION, MIDI_EXTENSION};
pub use scale::{all_keys, keys_from_names, Key, KeySignature, Mode};
