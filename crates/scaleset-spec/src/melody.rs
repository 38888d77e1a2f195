//! Scale melodies: one full pass over a scale as contiguous one-beat notes.

use serde::{Deserialize, Serialize};

use crate::error::MelodyError;
use crate::scale::Key;

/// Highest MIDI note number.
const MIDI_NOTE_MAX: u8 = 127;

/// Duration of every melody note, in beats.
pub const NOTE_BEATS: u32 = 1;

/// Semitone offset of the closing octave note.
pub const OCTAVE: u8 = 12;

/// Order in which a scale is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayDirection {
    /// Tonic upward.
    Ascending,
    /// Top note downward to the tonic.
    Descending,
}

impl PlayDirection {
    /// Every direction, in enumeration order.
    pub const ALL: [PlayDirection; 2] = [PlayDirection::Ascending, PlayDirection::Descending];

    /// Stable label used in file names and reports.
    pub fn label(self) -> &'static str {
        match self {
            PlayDirection::Ascending => "ASCENDING",
            PlayDirection::Descending => "DESCENDING",
        }
    }
}

impl std::fmt::Display for PlayDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A note placed on the beat grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedNote {
    /// Beat the note starts on.
    pub start_beat: u32,
    /// Beat the note ends on (exclusive).
    pub end_beat: u32,
    /// MIDI pitch.
    pub pitch: u8,
    /// Velocity, or `None` for the writer's default.
    pub velocity: Option<u8>,
}

/// Semitone offsets of each pitch class above the first one.
///
/// Offsets are taken modulo 12 so they always fall in `[0, 11]`; when
/// `include_octave_above` is set a final offset of exactly 12 is appended.
///
/// # Examples
/// ```
/// use scaleset_spec::melody::pitch_offsets;
///
/// // G major pitch classes wrap past B.
/// let offsets = pitch_offsets(&[7, 9, 11, 0, 2, 4, 6], true);
/// assert_eq!(offsets, vec![0, 2, 4, 5, 7, 9, 11, 12]);
/// ```
pub fn pitch_offsets(pitch_classes: &[u8], include_octave_above: bool) -> Vec<u8> {
    let Some(&first) = pitch_classes.first() else {
        return Vec::new();
    };

    let mut offsets: Vec<u8> = pitch_classes
        .iter()
        .map(|&pc| (i16::from(pc) - i16::from(first)).rem_euclid(12) as u8)
        .collect();
    if include_octave_above {
        offsets.push(OCTAVE);
    }
    offsets
}

/// Build a melody that walks a scale once in the given direction.
///
/// # Arguments
/// * `pitch_classes` - Scale pitch classes, tonic first
/// * `tonic_pitch` - MIDI pitch of the tonic
/// * `direction` - Ascending, or descending (pitch order reversed)
/// * `include_octave_above` - Append the tonic one octave up
///
/// # Returns
/// Notes of one beat each, contiguous from beat 0
pub fn build_melody(
    pitch_classes: &[u8],
    tonic_pitch: u8,
    direction: PlayDirection,
    include_octave_above: bool,
) -> Result<Vec<TimedNote>, MelodyError> {
    if pitch_classes.is_empty() {
        return Err(MelodyError::EmptyScale);
    }

    let mut pitches = pitch_offsets(pitch_classes, include_octave_above)
        .into_iter()
        .map(|offset| {
            tonic_pitch
                .checked_add(offset)
                .filter(|&p| p <= MIDI_NOTE_MAX)
                .ok_or(MelodyError::PitchOutOfRange {
                    tonic: tonic_pitch,
                    offset,
                })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    // Reverse before timing so beats always run forward from zero.
    if direction == PlayDirection::Descending {
        pitches.reverse();
    }

    Ok(pitches
        .into_iter()
        .enumerate()
        .map(|(i, pitch)| {
            let start_beat = i as u32 * NOTE_BEATS;
            TimedNote {
                start_beat,
                end_beat: start_beat + NOTE_BEATS,
                pitch,
                velocity: None,
            }
        })
        .collect())
}

/// Build the melody for a key using the scale lookup.
pub fn key_melody(
    key: &Key,
    direction: PlayDirection,
    include_octave_above: bool,
) -> Result<Vec<TimedNote>, MelodyError> {
    build_melody(
        &key.pitch_classes(),
        key.tonic_midi_pitch(),
        direction,
        include_octave_above,
    )
}
