//! 16-bit PCM WAV output through `hound`.

use std::path::Path;

use crate::error::{AudioError, AudioResult};

/// Bit depth of every WAV file written by the renderers.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Writes interleaved `[-1.0, 1.0]` samples as a 16-bit PCM WAV file,
/// replacing any existing file at `path`. Out-of-range samples are clipped.
///
/// # Arguments
/// * `path` - Output path
/// * `sample_rate` - Sample rate in Hz
/// * `channels` - Channel count; `samples.len()` must be a multiple of it
/// * `samples` - Interleaved samples
pub fn write_pcm16(path: &Path, sample_rate: u32, channels: u16, samples: &[f32]) -> AudioResult<()> {
    if channels == 0 || samples.len() % usize::from(channels) != 0 {
        return Err(AudioError::invalid_param(
            "channels",
            format!("{} samples do not split into {} channels", samples.len(), channels),
        ));
    }

    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).map_err(|e| AudioError::wav(path, e))?;
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16;
        writer
            .write_sample(value)
            .map_err(|e| AudioError::wav(path, e))?;
    }
    writer.finalize().map_err(|e| AudioError::wav(path, e))?;
    Ok(())
}
