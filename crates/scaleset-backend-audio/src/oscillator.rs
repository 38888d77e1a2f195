//! Built-in sine renderer used when no SoundFont is configured.
//!
//! Notes are read back from the MIDI file as spans and rendered as sine
//! tones under a linear attack/release envelope, then summed to mono. The
//! output depends only on the MIDI content, so renders are deterministic.

use std::f64::consts::PI;
use std::path::Path;

use scaleset_backend_midi::read_note_spans;

use crate::error::{AudioError, AudioResult};
use crate::renderer::{validate_sample_rate, AudioRenderer, DEFAULT_SAMPLE_RATE};
use crate::wav::write_pcm16;

/// Identifier recorded for files rendered by [`OscillatorRenderer`].
pub const BUILTIN_SINE_ID: &str = "builtin-sine";

/// Peak gain of a full-velocity note.
const NOTE_GAIN: f64 = 0.3;

/// Attack/release envelope parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    /// Attack time in seconds.
    pub attack: f64,
    /// Release time in seconds, applied after note-off.
    pub release: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            attack: 0.01,
            release: 0.05,
        }
    }
}

impl Envelope {
    /// Creates envelope parameters, clamping negative times to zero.
    pub fn new(attack: f64, release: f64) -> Self {
        Self {
            attack: attack.max(0.0),
            release: release.max(0.0),
        }
    }

    /// Gain at `t` seconds after note-on for a note held `held` seconds.
    pub fn gain_at(&self, t: f64, held: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }
        let sustain_level = |t: f64| {
            if self.attack > 0.0 && t < self.attack {
                t / self.attack
            } else {
                1.0
            }
        };
        if t < held {
            return sustain_level(t);
        }
        let release_level = sustain_level(held);
        if self.release <= 0.0 {
            return 0.0;
        }
        let progress = (t - held) / self.release;
        if progress >= 1.0 {
            0.0
        } else {
            release_level * (1.0 - progress)
        }
    }
}

/// Converts a MIDI pitch to frequency in Hz (A4 = 69 = 440 Hz).
pub fn midi_to_frequency(pitch: u8) -> f64 {
    440.0 * 2f64.powf((f64::from(pitch) - 69.0) / 12.0)
}

/// Mono sine renderer.
#[derive(Debug, Clone)]
pub struct OscillatorRenderer {
    sample_rate: u32,
    envelope: Envelope,
}

impl Default for OscillatorRenderer {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            envelope: Envelope::default(),
        }
    }
}

impl OscillatorRenderer {
    /// Creates a renderer at the default sample rate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer at `sample_rate`.
    pub fn with_sample_rate(sample_rate: u32) -> AudioResult<Self> {
        validate_sample_rate(sample_rate)?;
        Ok(Self {
            sample_rate,
            ..Self::default()
        })
    }

    /// Replaces the note envelope.
    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Renders SMF bytes to mono samples.
    pub fn render_samples(&self, midi_bytes: &[u8]) -> AudioResult<Vec<f32>> {
        let spans = read_note_spans(midi_bytes).map_err(|e| AudioError::Synthesis {
            message: e.to_string(),
        })?;
        let rate = f64::from(self.sample_rate);
        let end_seconds = spans
            .iter()
            .map(|s| s.end_seconds + self.envelope.release)
            .fold(0.0f64, f64::max);
        let total = (end_seconds * rate).ceil() as usize;
        let mut mix = vec![0f64; total];

        for span in &spans {
            let freq = midi_to_frequency(span.pitch);
            let gain = NOTE_GAIN * f64::from(span.velocity) / 127.0;
            let held = span.end_seconds - span.start_seconds;
            let start = (span.start_seconds * rate).round() as usize;
            let stop = (((span.end_seconds + self.envelope.release) * rate).ceil() as usize).min(total);
            for (i, out) in mix.iter_mut().enumerate().take(stop).skip(start) {
                let t = (i - start) as f64 / rate;
                *out += (2.0 * PI * freq * t).sin() * gain * self.envelope.gain_at(t, held);
            }
        }

        Ok(mix.into_iter().map(|s| s.clamp(-1.0, 1.0) as f32).collect())
    }
}

impl AudioRenderer for OscillatorRenderer {
    fn soundfont_id(&self) -> &str {
        BUILTIN_SINE_ID
    }

    fn render(&self, midi_path: &Path, wav_path: &Path) -> AudioResult<()> {
        let bytes = std::fs::read(midi_path).map_err(|e| AudioError::MidiInput {
            path: midi_path.to_path_buf(),
            message: e.to_string(),
        })?;
        let samples = self.render_samples(&bytes).map_err(|e| match e {
            AudioError::Synthesis { message } => AudioError::MidiInput {
                path: midi_path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        write_pcm16(wav_path, self.sample_rate, 1, &samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midi_to_frequency() {
        assert!((midi_to_frequency(69) - 440.0).abs() < 1e-9);
        assert!((midi_to_frequency(81) - 880.0).abs() < 1e-9);
        assert!((midi_to_frequency(60) - 261.6256).abs() < 1e-3);
    }

    #[test]
    fn test_envelope_shape() {
        let env = Envelope::new(0.1, 0.2);
        assert_eq!(env.gain_at(-1.0, 1.0), 0.0);
        assert!((env.gain_at(0.05, 1.0) - 0.5).abs() < 1e-9);
        assert_eq!(env.gain_at(0.5, 1.0), 1.0);
        assert!((env.gain_at(1.1, 1.0) - 0.5).abs() < 1e-9);
        assert_eq!(env.gain_at(1.3, 1.0), 0.0);
    }

    #[test]
    fn test_envelope_release_from_partial_attack() {
        let env = Envelope::new(0.1, 0.1);
        // Released halfway through the attack at level 0.5.
        assert!((env.gain_at(0.1, 0.05) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_garbage_midi_is_error() {
        let err = OscillatorRenderer::new().render_samples(b"nope").unwrap_err();
        assert_eq!(err.code(), "AUDIO_006");
    }
}
