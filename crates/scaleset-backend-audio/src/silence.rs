//! Silence detection for rendered WAV files.

use std::path::Path;

use crate::error::{AudioError, AudioResult};

/// Peak amplitude below which a file counts as silent.
pub const DEFAULT_SILENCE_THRESHOLD: f32 = 0.001;

/// Level summary of a WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioAnalysis {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of channels.
    pub channels: u16,
    /// Duration in seconds.
    pub duration_seconds: f32,
    /// Maximum absolute sample value, normalized to [0, 1].
    pub peak: f32,
    /// RMS level in dBFS, negative infinity for digital silence.
    pub rms_db: f32,
}

impl AudioAnalysis {
    /// Reads and analyzes a WAV file.
    pub fn from_path(path: &Path) -> AudioResult<Self> {
        let reader = hound::WavReader::open(path).map_err(|e| AudioError::wav(path, e))?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Int => {
                let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|s| s as f32 / max_val))
                    .collect::<Result<_, _>>()
                    .map_err(|e| AudioError::wav(path, e))?
            }
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| AudioError::wav(path, e))?,
        };

        Ok(Self::from_samples(&samples, spec.sample_rate, spec.channels))
    }

    /// Analyzes interleaved normalized samples.
    pub fn from_samples(samples: &[f32], sample_rate: u32, channels: u16) -> Self {
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        let rms = if samples.is_empty() {
            0.0
        } else {
            let sum_sq: f64 = samples.iter().map(|&s| f64::from(s).powi(2)).sum();
            (sum_sq / samples.len() as f64).sqrt() as f32
        };
        let rms_db = if rms <= 0.0 {
            f32::NEG_INFINITY
        } else {
            20.0 * rms.log10()
        };
        let frames = samples.len() / usize::from(channels.max(1));
        let duration_seconds = if sample_rate == 0 {
            0.0
        } else {
            frames as f32 / sample_rate as f32
        };

        Self {
            sample_rate,
            channels,
            duration_seconds,
            peak,
            rms_db,
        }
    }
}

/// Classifies WAV files as silent by peak amplitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceDetector {
    threshold: f32,
}

impl Default for SilenceDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SILENCE_THRESHOLD,
        }
    }
}

impl SilenceDetector {
    /// Creates a detector with a custom peak threshold.
    pub fn new(threshold: f32) -> AudioResult<Self> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(AudioError::invalid_param(
                "silence_threshold",
                format!("{threshold} is outside [0, 1]"),
            ));
        }
        Ok(Self { threshold })
    }

    /// Peak threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether an analysis counts as silent.
    pub fn classify(&self, analysis: &AudioAnalysis) -> bool {
        analysis.peak < self.threshold
    }

    /// Reads `path` and reports whether it is silent.
    ///
    /// An empty file (no samples) is silent.
    pub fn is_silent(&self, path: &Path) -> AudioResult<bool> {
        Ok(self.classify(&AudioAnalysis::from_path(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::write_pcm16;

    #[test]
    fn test_analysis_levels() {
        let analysis = AudioAnalysis::from_samples(&[0.5, -0.5, 0.5, -0.5], 4, 2);
        assert_eq!(analysis.peak, 0.5);
        assert!((analysis.rms_db - (-6.0206)).abs() < 1e-3);
        assert_eq!(analysis.duration_seconds, 0.5);

        let quiet = AudioAnalysis::from_samples(&[], 44_100, 1);
        assert_eq!(quiet.peak, 0.0);
        assert_eq!(quiet.rms_db, f32::NEG_INFINITY);
    }

    #[test]
    fn test_silent_and_audible_files() {
        let dir = tempfile::tempdir().unwrap();
        let detector = SilenceDetector::default();

        let silent = dir.path().join("silent.wav");
        write_pcm16(&silent, 44_100, 1, &vec![0.0; 4410]).unwrap();
        assert!(detector.is_silent(&silent).unwrap());

        let tone = dir.path().join("tone.wav");
        let samples: Vec<f32> = (0..4410).map(|i| (i as f32 * 0.05).sin() * 0.2).collect();
        write_pcm16(&tone, 44_100, 1, &samples).unwrap();
        assert!(!detector.is_silent(&tone).unwrap());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let detector = SilenceDetector::new(0.5).unwrap();
        let at = AudioAnalysis::from_samples(&[0.5], 44_100, 1);
        let below = AudioAnalysis::from_samples(&[0.49], 44_100, 1);
        assert!(!detector.classify(&at));
        assert!(detector.classify(&below));
    }

    #[test]
    fn test_invalid_threshold() {
        assert!(SilenceDetector::new(-0.1).is_err());
        assert!(SilenceDetector::new(f32::NAN).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SilenceDetector::default()
            .is_silent(&dir.path().join("none.wav"))
            .unwrap_err();
        assert_eq!(err.code(), "AUDIO_005");
    }
}
