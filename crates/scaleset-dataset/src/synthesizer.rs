//! Per-row synthesis: melody, MIDI file, rendered audio, silence check.

use std::path::Path;
use std::sync::Arc;

use scaleset_backend_audio::{AudioRenderer, SilenceDetector};
use scaleset_backend_midi::{MidiFile, MidiTrack, TrackSettings, DEFAULT_CHANNEL};
use scaleset_spec::{key_melody, ParameterRow, ResultRow};

use crate::error::RowError;

/// Turns one parameter row into a result row, writing its artifacts into
/// the dataset directory.
///
/// Processors are shared across worker threads.
pub trait RowProcessor: Send + Sync {
    /// Identifier of the soundfont recorded in result rows.
    fn soundfont_id(&self) -> &str;

    /// Processes one row. Artifacts go directly under `dataset_dir`.
    fn process(&self, row: &ParameterRow, dataset_dir: &Path) -> Result<ResultRow, RowError>;
}

/// The standard row processor.
#[derive(Clone)]
pub struct RowSynthesizer {
    renderer: Arc<dyn AudioRenderer>,
    detector: SilenceDetector,
    include_octave_above: bool,
}

impl std::fmt::Debug for RowSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowSynthesizer")
            .field("soundfont", &self.renderer.soundfont_id())
            .field("detector", &self.detector)
            .field("include_octave_above", &self.include_octave_above)
            .finish()
    }
}

impl RowSynthesizer {
    /// Creates a synthesizer with the default silence detector, appending
    /// the octave above the tonic.
    pub fn new(renderer: Arc<dyn AudioRenderer>) -> Self {
        Self {
            renderer,
            detector: SilenceDetector::default(),
            include_octave_above: true,
        }
    }

    /// Replaces the silence detector.
    pub fn with_detector(mut self, detector: SilenceDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Sets whether melodies end on the octave above the tonic.
    pub fn with_octave_above(mut self, include: bool) -> Self {
        self.include_octave_above = include;
        self
    }

    /// Builds the MIDI file for a row without touching the filesystem.
    pub fn build_midi(&self, row: &ParameterRow) -> Result<MidiFile, RowError> {
        let melody = key_melody(&row.key, row.direction, self.include_octave_above)?;
        let settings = TrackSettings::new(
            row.instrument.name.clone(),
            row.key.key_signature(),
            row.instrument.program,
        );
        let mut track = MidiTrack::new(settings)?;
        track.write_melody(&melody, DEFAULT_CHANNEL)?;

        let mut file = MidiFile::new();
        file.push_track(track);
        Ok(file)
    }
}

impl RowProcessor for RowSynthesizer {
    fn soundfont_id(&self) -> &str {
        self.renderer.soundfont_id()
    }

    fn process(&self, row: &ParameterRow, dataset_dir: &Path) -> Result<ResultRow, RowError> {
        let midi_path = dataset_dir.join(row.midi_filename());
        let audio_path = dataset_dir.join(row.audio_filename());

        self.build_midi(row)?.save(&midi_path)?;
        self.renderer
            .render(&midi_path, &audio_path)
            .map_err(RowError::Render)?;
        let is_silent = self
            .detector
            .is_silent(&audio_path)
            .map_err(RowError::Silence)?;

        Ok(ResultRow::for_row(row, self.soundfont_id(), is_silent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaleset_backend_audio::OscillatorRenderer;
    use scaleset_spec::{InstrumentDescriptor, Key, PlayDirection};

    fn row(direction: PlayDirection) -> ParameterRow {
        ParameterRow {
            index: 0,
            key: Key::parse("E", "phrygian").unwrap(),
            direction,
            instrument: InstrumentDescriptor::general_midi(73).unwrap(),
        }
    }

    fn synthesizer() -> RowSynthesizer {
        RowSynthesizer::new(Arc::new(
            OscillatorRenderer::with_sample_rate(16_000).unwrap(),
        ))
    }

    #[test]
    fn test_build_midi_track_settings() {
        let file = synthesizer().build_midi(&row(PlayDirection::Ascending)).unwrap();
        let track = &file.tracks()[0];
        assert_eq!(track.settings().name, "Flute");
        assert_eq!(track.settings().program, 73);
        assert_eq!(track.settings().channel, 2);
        assert_eq!(track.settings().bpm, 120);
        // E phrygian shares C major's signature.
        assert_eq!(track.settings().key.accidentals, 0);
        assert_eq!(track.notes().len(), 8);
        assert!(track.notes().iter().all(|n| n.channel == 2));
    }

    #[test]
    fn test_octave_flag() {
        let file = synthesizer()
            .with_octave_above(false)
            .build_midi(&row(PlayDirection::Descending))
            .unwrap();
        let pitches: Vec<u8> = file.tracks()[0].notes().iter().map(|n| n.note.pitch).collect();
        assert_eq!(pitches, vec![74, 72, 71, 69, 67, 65, 64]);
    }

    #[test]
    fn test_process_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let r = row(PlayDirection::Ascending);
        let result = synthesizer().process(&r, dir.path()).unwrap();

        assert_eq!(result.midi_file_path, "E_phrygian_ASCENDING_73_Flute.mid");
        assert_eq!(result.synth_file_path, "E_phrygian_ASCENDING_73_Flute.wav");
        assert_eq!(result.synth_soundfont, "builtin-sine");
        assert!(!result.is_silent);
        assert!(dir.path().join(&result.midi_file_path).is_file());
        assert!(dir.path().join(&result.synth_file_path).is_file());
    }

    #[test]
    fn test_process_missing_dir_fails_at_midi() {
        let dir = tempfile::tempdir().unwrap();
        let err = synthesizer()
            .process(&row(PlayDirection::Ascending), &dir.path().join("gone"))
            .unwrap_err();
        assert!(matches!(err, RowError::Midi(_)));
    }
}
