//! Standard MIDI File assembly and persistence.
//!
//! Output is deterministic: identical tracks always produce identical bytes,
//! so re-saving a file with the same content is a no-op on disk.

use midly::num::{u15, u24, u28, u4, u7};
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use std::path::Path;

use crate::error::MidiResult;
use crate::track::{MidiTrack, DEFAULT_VELOCITY};

/// Ticks per quarter note (one beat).
pub const TICKS_PER_BEAT: u16 = 480;

/// MIDI clocks per metronome click written in time signature events.
const CLOCKS_PER_CLICK: u8 = 24;

/// Notated 32nd notes per quarter written in time signature events.
const THIRTY_SECONDS_PER_QUARTER: u8 = 8;

/// A MIDI file under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MidiFile {
    tracks: Vec<MidiTrack>,
}

impl MidiFile {
    /// Creates an empty file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a track.
    pub fn push_track(&mut self, track: MidiTrack) {
        self.tracks.push(track);
    }

    /// Tracks in file order.
    pub fn tracks(&self) -> &[MidiTrack] {
        &self.tracks
    }

    /// Encodes the file as SMF bytes.
    pub fn to_bytes(&self) -> MidiResult<Vec<u8>> {
        let smf = self.to_smf();
        let mut buf = Vec::new();
        smf.write_std(&mut buf)?;
        Ok(buf)
    }

    /// Writes the file to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> MidiResult<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn to_smf(&self) -> Smf<'_> {
        let format = if self.tracks.len() <= 1 {
            Format::SingleTrack
        } else {
            Format::Parallel
        };
        let mut smf = Smf::new(Header::new(
            format,
            Timing::Metrical(u15::new(TICKS_PER_BEAT)),
        ));
        smf.tracks = self.tracks.iter().map(encode_track).collect();
        smf
    }
}

/// A timed event before delta encoding. Note-offs sort before note-ons on
/// the same tick so back-to-back notes of equal pitch retrigger cleanly.
struct PendingEvent {
    tick: u32,
    is_note_on: bool,
    channel: u8,
    key: u8,
    velocity: u8,
}

fn encode_track(track: &MidiTrack) -> Track<'_> {
    let settings = track.settings();
    let mut events: Track<'_> = Vec::new();

    let meta = |message: MetaMessage<'static>| TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(message),
    };

    events.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(settings.name.as_bytes())),
    });
    events.push(meta(MetaMessage::Tempo(u24::new(
        60_000_000 / u32::from(settings.bpm),
    ))));
    let (numerator, denominator) = settings.time_signature;
    events.push(meta(MetaMessage::TimeSignature(
        numerator,
        denominator.trailing_zeros() as u8,
        CLOCKS_PER_CLICK,
        THIRTY_SECONDS_PER_QUARTER,
    )));
    events.push(meta(MetaMessage::KeySignature(
        settings.key.accidentals,
        settings.key.minor,
    )));
    events.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel: u4::new(settings.channel),
            message: MidiMessage::ProgramChange {
                program: u7::new(settings.program),
            },
        },
    });

    let mut pending: Vec<PendingEvent> = Vec::with_capacity(track.notes().len() * 2);
    for channel_note in track.notes() {
        let note = channel_note.note;
        let velocity = note.velocity.unwrap_or(DEFAULT_VELOCITY);
        pending.push(PendingEvent {
            tick: note.start_beat * u32::from(TICKS_PER_BEAT),
            is_note_on: true,
            channel: channel_note.channel,
            key: note.pitch,
            velocity,
        });
        pending.push(PendingEvent {
            tick: note.end_beat * u32::from(TICKS_PER_BEAT),
            is_note_on: false,
            channel: channel_note.channel,
            key: note.pitch,
            velocity: 0,
        });
    }
    // Stable sort keeps write order among simultaneous events of one kind.
    pending.sort_by_key(|e| (e.tick, e.is_note_on));

    let mut last_tick = 0u32;
    for event in pending {
        let message = if event.is_note_on {
            MidiMessage::NoteOn {
                key: u7::new(event.key),
                vel: u7::new(event.velocity),
            }
        } else {
            MidiMessage::NoteOff {
                key: u7::new(event.key),
                vel: u7::new(event.velocity),
            }
        };
        events.push(TrackEvent {
            delta: u28::new(event.tick - last_tick),
            kind: TrackEventKind::Midi {
                channel: u4::new(event.channel),
                message,
            },
        });
        last_tick = event.tick;
    }

    events.push(meta(MetaMessage::EndOfTrack));
    events
}
