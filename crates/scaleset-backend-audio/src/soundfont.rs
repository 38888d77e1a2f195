//! SoundFont rendering through `rustysynth`.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustysynth::{MidiFile, MidiFileSequencer, SoundFont, Synthesizer, SynthesizerSettings};

use crate::error::{AudioError, AudioResult};
use crate::renderer::{validate_sample_rate, AudioRenderer, DEFAULT_SAMPLE_RATE};
use crate::wav::write_pcm16;

/// Seconds rendered past the end of the last MIDI event so releases ring out.
pub const DEFAULT_TAIL_SECONDS: f64 = 1.0;

/// Renders MIDI files with a SoundFont.
///
/// The SoundFont is parsed once and shared; each render builds its own
/// synthesizer, so one renderer can serve many threads.
pub struct SoundFontRenderer {
    path: PathBuf,
    id: String,
    sound_font: Arc<SoundFont>,
    sample_rate: u32,
    tail_seconds: f64,
}

impl std::fmt::Debug for SoundFontRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundFontRenderer")
            .field("path", &self.path)
            .field("sample_rate", &self.sample_rate)
            .field("tail_seconds", &self.tail_seconds)
            .finish()
    }
}

impl SoundFontRenderer {
    /// Loads a SoundFont at the default sample rate.
    pub fn load(path: &Path) -> AudioResult<Self> {
        Self::with_sample_rate(path, DEFAULT_SAMPLE_RATE)
    }

    /// Loads a SoundFont, rendering at `sample_rate`.
    pub fn with_sample_rate(path: &Path, sample_rate: u32) -> AudioResult<Self> {
        validate_sample_rate(sample_rate)?;
        let file = File::open(path).map_err(|e| AudioError::SoundFont {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut reader = BufReader::new(file);
        let sound_font = SoundFont::new(&mut reader).map_err(|e| AudioError::SoundFont {
            path: path.to_path_buf(),
            message: format!("{e:?}"),
        })?;

        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            id,
            sound_font: Arc::new(sound_font),
            sample_rate,
            tail_seconds: DEFAULT_TAIL_SECONDS,
        })
    }

    /// Sets the release tail length.
    pub fn with_tail(mut self, seconds: f64) -> AudioResult<Self> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(AudioError::invalid_param(
                "tail_seconds",
                format!("{seconds} is not a non-negative number"),
            ));
        }
        self.tail_seconds = seconds;
        Ok(self)
    }

    /// Path the SoundFont was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl AudioRenderer for SoundFontRenderer {
    fn soundfont_id(&self) -> &str {
        &self.id
    }

    fn render(&self, midi_path: &Path, wav_path: &Path) -> AudioResult<()> {
        let file = File::open(midi_path).map_err(|e| AudioError::MidiInput {
            path: midi_path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut reader = BufReader::new(file);
        let midi = MidiFile::new(&mut reader).map_err(|e| AudioError::MidiInput {
            path: midi_path.to_path_buf(),
            message: format!("{e:?}"),
        })?;
        let midi = Arc::new(midi);

        let settings = SynthesizerSettings::new(self.sample_rate as i32);
        let synthesizer =
            Synthesizer::new(&self.sound_font, &settings).map_err(|e| AudioError::Synthesis {
                message: format!("{e:?}"),
            })?;
        let mut sequencer = MidiFileSequencer::new(synthesizer);
        sequencer.play(&midi, false);

        let frames =
            ((midi.get_length() + self.tail_seconds) * f64::from(self.sample_rate)).ceil() as usize;
        let mut left = vec![0f32; frames];
        let mut right = vec![0f32; frames];
        sequencer.render(&mut left[..], &mut right[..]);

        let interleaved: Vec<f32> = left
            .iter()
            .zip(right.iter())
            .flat_map(|(&l, &r)| [l, r])
            .collect();
        write_pcm16(wav_path, self.sample_rate, 2, &interleaved)
    }
}
