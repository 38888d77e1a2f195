//! Integration tests for the MIDI writer: parse output back with midly and
//! check on-disk behavior.

use midly::{MetaMessage, MidiMessage, Smf, TrackEventKind};
use pretty_assertions::assert_eq;
use scaleset_backend_midi::{read_note_spans, MidiFile, MidiTrack, TrackSettings};
use scaleset_spec::{key_melody, Key, PlayDirection};

// =============================================================================
// Helper Functions
// =============================================================================

fn scale_file(root: &str, mode: &str, direction: PlayDirection) -> MidiFile {
    let key = Key::parse(root, mode).unwrap();
    let melody = key_melody(&key, direction, true).unwrap();
    let settings = TrackSettings::new("Acoustic Grand Piano", key.key_signature(), 0);
    let mut track = MidiTrack::new(settings).unwrap();
    track.write_melody(&melody, 2).unwrap();
    let mut file = MidiFile::new();
    file.push_track(track);
    file
}

fn note_on_keys(smf: &Smf) -> Vec<u8> {
    smf.tracks[0]
        .iter()
        .filter_map(|e| match e.kind {
            TrackEventKind::Midi {
                message: MidiMessage::NoteOn { key, vel },
                ..
            } if vel.as_int() > 0 => Some(key.as_int()),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_track_header_events() {
    let bytes = scale_file("D", "ionian", PlayDirection::Ascending)
        .to_bytes()
        .unwrap();
    let smf = Smf::parse(&bytes).unwrap();
    let track = &smf.tracks[0];

    assert!(matches!(
        track[0].kind,
        TrackEventKind::Meta(MetaMessage::TrackName(b"Acoustic Grand Piano"))
    ));
    assert!(track.iter().any(|e| matches!(
        e.kind,
        TrackEventKind::Meta(MetaMessage::Tempo(t)) if t.as_int() == 500_000
    )));
    assert!(track.iter().any(|e| matches!(
        e.kind,
        TrackEventKind::Meta(MetaMessage::TimeSignature(4, 2, _, _))
    )));
    assert!(track.iter().any(|e| matches!(
        e.kind,
        TrackEventKind::Meta(MetaMessage::KeySignature(2, false))
    )));
    assert!(track.iter().any(|e| matches!(
        e.kind,
        TrackEventKind::Midi { channel, message: MidiMessage::ProgramChange { program } }
            if channel.as_int() == 2 && program.as_int() == 0
    )));
    assert!(matches!(
        track.last().unwrap().kind,
        TrackEventKind::Meta(MetaMessage::EndOfTrack)
    ));
}

#[test]
fn test_ascending_and_descending_pitches() {
    let up = scale_file("C", "ionian", PlayDirection::Ascending)
        .to_bytes()
        .unwrap();
    let down = scale_file("C", "ionian", PlayDirection::Descending)
        .to_bytes()
        .unwrap();

    let up_keys = note_on_keys(&Smf::parse(&up).unwrap());
    let mut down_keys = note_on_keys(&Smf::parse(&down).unwrap());

    assert_eq!(up_keys, vec![60, 62, 64, 65, 67, 69, 71, 72]);
    down_keys.reverse();
    assert_eq!(down_keys, up_keys);
}

#[test]
fn test_note_spans_round_trip_timing() {
    let bytes = scale_file("A", "aeolian", PlayDirection::Descending)
        .to_bytes()
        .unwrap();
    let spans = read_note_spans(&bytes).unwrap();

    assert_eq!(spans.len(), 8);
    assert_eq!(spans[0].pitch, 81);
    assert_eq!(spans[7].pitch, 69);
    for (i, span) in spans.iter().enumerate() {
        assert!((span.start_seconds - i as f64 * 0.5).abs() < 1e-9);
        assert!((span.end_seconds - span.start_seconds - 0.5).abs() < 1e-9);
        assert_eq!(span.velocity, 100);
    }
}

#[test]
fn test_save_overwrites_with_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("C_ionian_ASCENDING_0_Acoustic_Grand_Piano.mid");

    std::fs::write(&path, b"stale").unwrap();
    let file = scale_file("C", "ionian", PlayDirection::Ascending);
    file.save(&path).unwrap();
    let first = std::fs::read(&path).unwrap();
    file.save(&path).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, file.to_bytes().unwrap());
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("x.mid");
    let err = scale_file("C", "ionian", PlayDirection::Ascending)
        .save(&path)
        .unwrap_err();
    assert_eq!(err.code(), "MIDI_008");
}
