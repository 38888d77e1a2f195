//! Scaleset MIDI Backend
//!
//! Builds single-instrument Standard MIDI Files from timed-note melodies and
//! reads note timing back out of them.
//!
//! # Determinism
//!
//! Writing is deterministic. The same tracks and notes always encode to the
//! same bytes, so regenerating a dataset row reproduces its `.mid` exactly.
//!
//! # Example
//!
//! ```
//! use scaleset_backend_midi::{MidiFile, MidiTrack, TrackSettings};
//! use scaleset_spec::{key_melody, Key, PlayDirection};
//!
//! let key = Key::parse("D", "ionian").unwrap();
//! let melody = key_melody(&key, PlayDirection::Ascending, true).unwrap();
//!
//! let settings = TrackSettings::new("Acoustic Grand Piano", key.key_signature(), 0);
//! let mut track = MidiTrack::new(settings).unwrap();
//! track.write_melody(&melody, 2).unwrap();
//!
//! let mut file = MidiFile::new();
//! file.push_track(track);
//! let bytes = file.to_bytes().unwrap();
//! assert_eq!(&bytes[..4], b"MThd");
//! ```
//!
//! # Crate Structure
//!
//! - [`track`] - Track settings and melody placement
//! - [`writer`] - SMF encoding and saving
//! - [`reader`] - Note span extraction with tempo handling
//! - [`error`] - Error types

pub mod error;
pub mod reader;
pub mod track;
pub mod writer;

pub use error::{MidiError, MidiResult};
pub use reader::{read_note_spans, NoteSpan};
pub use track::{
    ChannelNote, MidiTrack, TrackSettings, DEFAULT_BPM, DEFAULT_CHANNEL, DEFAULT_TIME_SIGNATURE,
    DEFAULT_VELOCITY, MIN_BPM,
};
pub use writer::{MidiFile, TICKS_PER_BEAT};
