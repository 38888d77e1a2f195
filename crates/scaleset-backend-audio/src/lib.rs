//! Scaleset Audio Backend
//!
//! Renders MIDI files to WAV and classifies the results as silent or not.
//!
//! - [`SoundFontRenderer`] plays a MIDI file through a SoundFont with `rustysynth`
//!   and writes 16-bit stereo WAV.
//! - [`OscillatorRenderer`] is a dependency-free fallback that renders each note
//!   as an enveloped sine and writes 16-bit mono WAV.
//! - [`SilenceDetector`] reads a WAV with `hound` and compares its peak
//!   amplitude against a threshold.
//!
//! Both renderers implement [`AudioRenderer`], the trait the dataset pipeline
//! depends on.
//!
//! # Example
//!
//! ```ignore
//! use scaleset_backend_audio::{AudioRenderer, SilenceDetector, SoundFontRenderer};
//!
//! let renderer = SoundFontRenderer::load("FluidR3_GM.sf2".as_ref())?;
//! renderer.render("scale.mid".as_ref(), "scale.wav".as_ref())?;
//! let silent = SilenceDetector::default().is_silent("scale.wav".as_ref())?;
//! ```

pub mod error;
pub mod oscillator;
pub mod renderer;
pub mod silence;
pub mod soundfont;
pub mod wav;

pub use error::{AudioError, AudioResult};
pub use oscillator::{midi_to_frequency, Envelope, OscillatorRenderer, BUILTIN_SINE_ID};
pub use renderer::{
    validate_sample_rate, AudioRenderer, DEFAULT_SAMPLE_RATE, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE,
};
pub use silence::{AudioAnalysis, SilenceDetector, DEFAULT_SILENCE_THRESHOLD};
pub use soundfont::{SoundFontRenderer, DEFAULT_TAIL_SECONDS};
pub use wav::{write_pcm16, BITS_PER_SAMPLE};
