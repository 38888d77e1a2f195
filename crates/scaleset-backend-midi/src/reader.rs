//! Reads note spans back out of Standard MIDI Files.
//!
//! Used by renderers that synthesize audio directly from note timing rather
//! than through a full MIDI sequencer.

use std::collections::BTreeMap;

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

use crate::error::{MidiError, MidiResult};

/// Microseconds per quarter note when a file has no tempo event (120 BPM).
const DEFAULT_TEMPO_US: u32 = 500_000;

/// A sounding note with absolute timing in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteSpan {
    /// MIDI pitch.
    pub pitch: u8,
    /// Note-on velocity.
    pub velocity: u8,
    /// Channel the note was played on.
    pub channel: u8,
    /// Program active on the channel when the note started.
    pub program: u8,
    /// Start time in seconds.
    pub start_seconds: f64,
    /// End time in seconds.
    pub end_seconds: f64,
}

/// Converts ticks to seconds across tempo changes.
struct TempoMap {
    ticks_per_beat: f64,
    /// (tick, microseconds per beat), sorted by tick, first entry at tick 0.
    changes: Vec<(u64, u32)>,
}

impl TempoMap {
    fn seconds_at(&self, tick: u64) -> f64 {
        let mut seconds = 0.0;
        for (i, &(start, tempo)) in self.changes.iter().enumerate() {
            let end = self
                .changes
                .get(i + 1)
                .map_or(tick, |&(next, _)| next.min(tick));
            if end <= start {
                break;
            }
            seconds += (end - start) as f64 * f64::from(tempo) / 1_000_000.0 / self.ticks_per_beat;
        }
        seconds
    }
}

/// Parses SMF bytes and returns every note as a span, ordered by start time.
///
/// A note-on with velocity 0 counts as a note-off. Notes still held at the
/// end of their track are closed at the track's final tick.
pub fn read_note_spans(bytes: &[u8]) -> MidiResult<Vec<NoteSpan>> {
    let smf = Smf::parse(bytes)?;
    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(tpb) if tpb.as_int() > 0 => f64::from(tpb.as_int()),
        Timing::Metrical(_) => {
            return Err(MidiError::UnsupportedTiming(
                "zero ticks per quarter note".to_string(),
            ))
        }
        Timing::Timecode(fps, sub) => {
            return Err(MidiError::UnsupportedTiming(format!(
                "SMPTE {} fps, {} subframes",
                fps.as_f32(),
                sub
            )))
        }
    };

    let mut tempo_changes = vec![(0u64, DEFAULT_TEMPO_US)];
    for track in &smf.tracks {
        let mut tick = 0u64;
        for event in track {
            tick += u64::from(event.delta.as_int());
            if let TrackEventKind::Meta(MetaMessage::Tempo(tempo)) = event.kind {
                tempo_changes.push((tick, tempo.as_int()));
            }
        }
    }
    // Later entries win at equal ticks, so the explicit tempo replaces the default.
    tempo_changes.sort_by_key(|&(tick, _)| tick);
    tempo_changes.dedup_by(|later, earlier| {
        if later.0 == earlier.0 {
            earlier.1 = later.1;
            true
        } else {
            false
        }
    });
    let tempo = TempoMap {
        ticks_per_beat,
        changes: tempo_changes,
    };

    let mut spans = Vec::new();
    for track in &smf.tracks {
        let mut tick = 0u64;
        let mut programs = [0u8; 16];
        let mut held: BTreeMap<(u8, u8), Vec<(u64, u8, u8)>> = BTreeMap::new();

        for event in track {
            tick += u64::from(event.delta.as_int());
            let TrackEventKind::Midi { channel, message } = event.kind else {
                continue;
            };
            let channel = channel.as_int();
            match message {
                MidiMessage::ProgramChange { program } => {
                    programs[usize::from(channel)] = program.as_int();
                }
                MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                    held.entry((channel, key.as_int())).or_default().push((
                        tick,
                        vel.as_int(),
                        programs[usize::from(channel)],
                    ));
                }
                MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => {
                    let pitch = key.as_int();
                    if let Some(stack) = held.get_mut(&(channel, pitch)) {
                        if !stack.is_empty() {
                            let (start, velocity, program) = stack.remove(0);
                            spans.push(NoteSpan {
                                pitch,
                                velocity,
                                channel,
                                program,
                                start_seconds: tempo.seconds_at(start),
                                end_seconds: tempo.seconds_at(tick),
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        for ((channel, pitch), stack) in held {
            for (start, velocity, program) in stack {
                spans.push(NoteSpan {
                    pitch,
                    velocity,
                    channel,
                    program,
                    start_seconds: tempo.seconds_at(start),
                    end_seconds: tempo.seconds_at(tick),
                });
            }
        }
    }

    spans.sort_by(|a, b| {
        a.start_seconds
            .total_cmp(&b.start_seconds)
            .then(a.pitch.cmp(&b.pitch))
    });
    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::{MidiTrack, TrackSettings};
    use crate::writer::MidiFile;
    use scaleset_spec::{KeySignature, TimedNote};

    fn file_with(bpm: u16, pitches: &[u8]) -> Vec<u8> {
        let settings = TrackSettings::new(
            "Piano",
            KeySignature {
                accidentals: 0,
                minor: false,
            },
            5,
        )
        .with_bpm(bpm);
        let mut track = MidiTrack::new(settings).unwrap();
        let melody: Vec<TimedNote> = pitches
            .iter()
            .enumerate()
            .map(|(i, &pitch)| TimedNote {
                start_beat: i as u32,
                end_beat: i as u32 + 1,
                pitch,
                velocity: Some(90),
            })
            .collect();
        track.write_melody(&melody, 2).unwrap();
        let mut file = MidiFile::new();
        file.push_track(track);
        file.to_bytes().unwrap()
    }

    #[test]
    fn test_spans_follow_tempo() {
        let spans = read_note_spans(&file_with(120, &[60, 62, 64])).unwrap();
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].pitch, 60);
        assert_eq!(spans[2].pitch, 64);
        assert!((spans[1].start_seconds - 0.5).abs() < 1e-9);
        assert!((spans[2].end_seconds - 1.5).abs() < 1e-9);
        assert_eq!(spans[0].channel, 2);
        assert_eq!(spans[0].program, 5);
        assert_eq!(spans[0].velocity, 90);

        let slow = read_note_spans(&file_with(60, &[60, 62])).unwrap();
        assert!((slow[1].end_seconds - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = read_note_spans(b"not a midi file").unwrap_err();
        assert_eq!(err.code(), "MIDI_006");
    }
}
