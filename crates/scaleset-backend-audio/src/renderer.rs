//! The renderer seam between the dataset pipeline and synthesis engines.

use std::path::Path;

use crate::error::{AudioError, AudioResult};

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Lowest sample rate a renderer accepts.
pub const MIN_SAMPLE_RATE: u32 = 16_000;

/// Highest sample rate a renderer accepts.
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// Renders a MIDI file to a WAV file.
///
/// Implementations are shared across worker threads, so `render` takes
/// `&self` and must not rely on per-call mutable state held in the renderer.
pub trait AudioRenderer: Send + Sync {
    /// Identifier recorded alongside each rendered file (for example the
    /// soundfont file name).
    fn soundfont_id(&self) -> &str;

    /// Renders `midi_path` to `wav_path`, replacing any existing file.
    fn render(&self, midi_path: &Path, wav_path: &Path) -> AudioResult<()>;
}

/// Checks that a sample rate is within the supported range.
pub fn validate_sample_rate(rate: u32) -> AudioResult<()> {
    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&rate) {
        return Err(AudioError::InvalidSampleRate { rate });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_rate_bounds() {
        assert!(validate_sample_rate(DEFAULT_SAMPLE_RATE).is_ok());
        assert!(validate_sample_rate(MIN_SAMPLE_RATE).is_ok());
        assert!(validate_sample_rate(MAX_SAMPLE_RATE).is_ok());
        assert!(matches!(
            validate_sample_rate(8_000),
            Err(AudioError::InvalidSampleRate { rate: 8_000 })
        ));
    }
}
