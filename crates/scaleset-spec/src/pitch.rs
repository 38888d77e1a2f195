//! Pitch class parsing and naming.
//!
//! Root notes are identified by their pitch class (0-11, C = 0). Names are
//! parsed leniently (`"C#"`, `"Db"`, `"cs"`) and always displayed with sharp
//! spelling, which is also the spelling used in dataset file names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EnumerationError;

/// Sharp-spelled names for the twelve pitch classes.
pub const PITCH_CLASS_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// MIDI pitch of the tonic octave (C4 = 60).
pub const TONIC_OCTAVE_BASE: u8 = 60;

/// A pitch class in 0..12, independent of octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PitchClass(u8);

impl PitchClass {
    /// All twelve chromatic pitch classes in ascending order from C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass(0),
        PitchClass(1),
        PitchClass(2),
        PitchClass(3),
        PitchClass(4),
        PitchClass(5),
        PitchClass(6),
        PitchClass(7),
        PitchClass(8),
        PitchClass(9),
        PitchClass(10),
        PitchClass(11),
    ];

    /// Creates a pitch class, wrapping the value into 0..12.
    pub fn new(value: u8) -> Self {
        Self(value % 12)
    }

    /// Returns the semitone value (0-11).
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns the sharp-spelled name (e.g., "F#").
    pub fn name(self) -> &'static str {
        PITCH_CLASS_NAMES_SHARP[self.0 as usize]
    }

    /// Returns the MIDI pitch of this pitch class in the tonic octave.
    ///
    /// # Examples
    /// ```
    /// use scaleset_spec::PitchClass;
    ///
    /// let a: PitchClass = "A".parse().unwrap();
    /// assert_eq!(a.tonic_midi_pitch(), 69);
    /// ```
    pub fn tonic_midi_pitch(self) -> u8 {
        TONIC_OCTAVE_BASE + self.0
    }

    /// Parse a pitch class name into a pitch class.
    ///
    /// Accepts a note letter (either case) followed by an optional `#`, `s`,
    /// or `b` accidental.
    pub fn parse(name: &str) -> Result<Self, EnumerationError> {
        let unknown = || EnumerationError::UnknownRootNote {
            name: name.to_string(),
        };

        let trimmed = name.trim();
        let mut chars = trimmed.chars();
        let letter = chars.next().ok_or_else(unknown)?;
        let base: i32 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(unknown()),
        };

        let accidental: i32 = match chars.next() {
            None => 0,
            Some('#') | Some('s') => 1,
            Some('b') => -1,
            Some(_) => return Err(unknown()),
        };
        if chars.next().is_some() {
            return Err(unknown());
        }

        Ok(Self((base + accidental).rem_euclid(12) as u8))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = EnumerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PitchClass {
    type Error = EnumerationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> Self {
        pc.name().to_string()
    }
}
