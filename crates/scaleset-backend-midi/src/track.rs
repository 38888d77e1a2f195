//! Track settings and melody placement.

use scaleset_spec::{KeySignature, TimedNote};

use crate::error::{MidiError, MidiResult};

/// Default tempo in beats per minute.
pub const DEFAULT_BPM: u16 = 120;

/// Slowest tempo whose microseconds-per-beat fits the 24-bit tempo event.
pub const MIN_BPM: u16 = 4;

/// Default time signature (numerator, denominator).
pub const DEFAULT_TIME_SIGNATURE: (u8, u8) = (4, 4);

/// Default channel for instrument tracks.
pub const DEFAULT_CHANNEL: u8 = 2;

/// Velocity applied to notes that do not carry one.
pub const DEFAULT_VELOCITY: u8 = 100;

/// Header settings for a single instrument track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSettings {
    /// Tempo in beats per minute.
    pub bpm: u16,
    /// Time signature as (numerator, denominator).
    pub time_signature: (u8, u8),
    /// Key signature.
    pub key: KeySignature,
    /// Track name.
    pub name: String,
    /// MIDI program selected at the start of the track.
    pub program: u8,
    /// Channel the program change is sent on.
    pub channel: u8,
}

impl TrackSettings {
    /// Creates settings with the default tempo, time signature, and channel.
    pub fn new(name: impl Into<String>, key: KeySignature, program: u8) -> Self {
        Self {
            bpm: DEFAULT_BPM,
            time_signature: DEFAULT_TIME_SIGNATURE,
            key,
            name: name.into(),
            program,
            channel: DEFAULT_CHANNEL,
        }
    }

    /// Sets the tempo.
    pub fn with_bpm(mut self, bpm: u16) -> Self {
        self.bpm = bpm;
        self
    }

    /// Sets the time signature.
    pub fn with_time_signature(mut self, numerator: u8, denominator: u8) -> Self {
        self.time_signature = (numerator, denominator);
        self
    }

    /// Sets the channel.
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    fn validate(&self) -> MidiResult<()> {
        validate_channel(self.channel)?;
        if self.program > 127 {
            return Err(MidiError::InvalidProgram {
                program: self.program,
            });
        }
        if self.bpm < MIN_BPM {
            return Err(MidiError::InvalidTempo { bpm: self.bpm });
        }
        let (numerator, denominator) = self.time_signature;
        if numerator == 0 || !denominator.is_power_of_two() {
            return Err(MidiError::InvalidTimeSignature {
                numerator,
                denominator,
            });
        }
        Ok(())
    }
}

/// A note placed on a specific channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelNote {
    /// Channel the note is played on.
    pub channel: u8,
    /// The note.
    pub note: TimedNote,
}

/// One track: header settings plus the notes written onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiTrack {
    settings: TrackSettings,
    notes: Vec<ChannelNote>,
}

impl MidiTrack {
    /// Creates an empty track after validating its settings.
    pub fn new(settings: TrackSettings) -> MidiResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            notes: Vec::new(),
        })
    }

    /// Track settings.
    pub fn settings(&self) -> &TrackSettings {
        &self.settings
    }

    /// Notes written so far, in write order.
    pub fn notes(&self) -> &[ChannelNote] {
        &self.notes
    }

    /// Writes a melody onto the track at the given channel.
    ///
    /// All notes are validated before any is added, so a failed write leaves
    /// the track unchanged.
    pub fn write_melody(&mut self, melody: &[TimedNote], channel: u8) -> MidiResult<()> {
        validate_channel(channel)?;
        for note in melody {
            if note.end_beat <= note.start_beat {
                return Err(MidiError::InvalidNote {
                    start_beat: note.start_beat,
                    message: format!("ends at beat {}", note.end_beat),
                });
            }
            if note.pitch > 127 {
                return Err(MidiError::InvalidNote {
                    start_beat: note.start_beat,
                    message: format!("pitch {} above 127", note.pitch),
                });
            }
            if note.velocity.is_some_and(|v| v > 127) {
                return Err(MidiError::InvalidNote {
                    start_beat: note.start_beat,
                    message: "velocity above 127".to_string(),
                });
            }
        }

        self.notes
            .extend(melody.iter().map(|&note| ChannelNote { channel, note }));
        Ok(())
    }
}

fn validate_channel(channel: u8) -> MidiResult<()> {
    if channel > 15 {
        return Err(MidiError::InvalidChannel { channel });
    }
    Ok(())
}
