//! Dataset run configuration.
//!
//! Loaded from JSON; every field is optional and falls back to the defaults
//! below. Callers (the CLI) layer command-line overrides on top.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use scaleset_backend_audio::{
    validate_sample_rate, AudioRenderer, OscillatorRenderer, SilenceDetector, SoundFontRenderer,
    DEFAULT_SAMPLE_RATE, DEFAULT_SILENCE_THRESHOLD,
};
use scaleset_spec::{
    default_instruments, keys_from_names, InstrumentDescriptor, Key, PITCH_CLASS_NAMES_SHARP,
};
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, DatasetResult};

/// Default dataset name.
pub const DEFAULT_DATASET_NAME: &str = "keys_new";

/// Default parent directory for datasets.
pub const DEFAULT_OUT_ROOT: &str = "./output";

/// Default worker pool size.
pub const DEFAULT_WORKERS: usize = 4;

/// Environment variable consulted for a soundfont when none is configured.
pub const SOUNDFONT_ENV: &str = "SCALESET_SOUNDFONT";

/// What the pipeline does when a row fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Record the failure and keep going.
    #[default]
    Skip,
    /// Stop dispatching new rows and fail the run.
    Abort,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(FailurePolicy::Skip),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(format!("unknown failure policy '{}'", other)),
        }
    }
}

/// Configuration for one dataset run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    /// Dataset directory name under `out_root`.
    pub name: String,
    /// Parent directory of the dataset directory.
    pub out_root: PathBuf,
    /// Root note names, in enumeration order.
    pub roots: Vec<String>,
    /// Mode names, in enumeration order.
    pub modes: Vec<String>,
    /// Instruments; `None` uses the default list.
    pub instruments: Option<Vec<InstrumentDescriptor>>,
    /// Worker pool size.
    pub workers: usize,
    /// SoundFont to render with; `None` uses the built-in oscillator.
    pub soundfont: Option<PathBuf>,
    /// Append the octave above the tonic to every melody.
    pub include_octave_above: bool,
    /// Row failure handling.
    pub failure_policy: FailurePolicy,
    /// Peak amplitude below which a rendering counts as silent.
    pub silence_threshold: f32,
    /// Render sample rate in Hz.
    pub sample_rate: u32,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DATASET_NAME.to_string(),
            out_root: PathBuf::from(DEFAULT_OUT_ROOT),
            roots: PITCH_CLASS_NAMES_SHARP.iter().map(|s| s.to_string()).collect(),
            modes: vec!["ionian".to_string()],
            instruments: None,
            workers: DEFAULT_WORKERS,
            soundfont: None,
            include_octave_above: true,
            failure_policy: FailurePolicy::Skip,
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl DatasetConfig {
    /// Parses a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a config file.
    pub fn load(path: &Path) -> DatasetResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DatasetError::ConfigLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&text).map_err(|e| DatasetError::ConfigLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Dataset directory: `out_root/name`.
    pub fn dataset_dir(&self) -> PathBuf {
        self.out_root.join(&self.name)
    }

    /// Checks numeric ranges and the dataset name.
    pub fn validate(&self) -> DatasetResult<()> {
        if self.name.trim().is_empty() || self.name.contains(['/', '\\']) {
            return Err(DatasetError::InvalidConfig {
                field: "name",
                message: format!("'{}' is not a single directory name", self.name),
            });
        }
        if self.workers == 0 {
            return Err(DatasetError::InvalidConfig {
                field: "workers",
                message: "must be at least 1".to_string(),
            });
        }
        if !self.silence_threshold.is_finite() || !(0.0..=1.0).contains(&self.silence_threshold) {
            return Err(DatasetError::InvalidConfig {
                field: "silence_threshold",
                message: format!("{} is outside [0, 1]", self.silence_threshold),
            });
        }
        validate_sample_rate(self.sample_rate).map_err(|e| DatasetError::InvalidConfig {
            field: "sample_rate",
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Keys to enumerate, roots outermost.
    pub fn keys(&self) -> DatasetResult<Vec<Key>> {
        Ok(keys_from_names(&self.roots, &self.modes)?)
    }

    /// Instruments to enumerate.
    pub fn instruments(&self) -> Vec<InstrumentDescriptor> {
        self.instruments.clone().unwrap_or_else(default_instruments)
    }

    /// Fills `soundfont` from [`SOUNDFONT_ENV`] when it is unset.
    pub fn apply_env(&mut self) {
        let env_value = std::env::var(SOUNDFONT_ENV).ok();
        self.soundfont = resolve_soundfont(self.soundfont.take(), env_value);
    }

    /// Builds the silence detector for this run.
    pub fn silence_detector(&self) -> DatasetResult<SilenceDetector> {
        SilenceDetector::new(self.silence_threshold).map_err(|e| DatasetError::InvalidConfig {
            field: "silence_threshold",
            message: e.to_string(),
        })
    }

    /// Builds the renderer: the configured SoundFont, or the built-in
    /// oscillator when none is set.
    pub fn build_renderer(&self) -> DatasetResult<Arc<dyn AudioRenderer>> {
        match &self.soundfont {
            Some(path) => {
                let renderer = SoundFontRenderer::with_sample_rate(path, self.sample_rate)
                    .map_err(DatasetError::Renderer)?;
                Ok(Arc::new(renderer))
            }
            None => {
                let renderer = OscillatorRenderer::with_sample_rate(self.sample_rate)
                    .map_err(DatasetError::Renderer)?;
                Ok(Arc::new(renderer))
            }
        }
    }
}

/// Picks the configured soundfont, falling back to a non-empty environment value.
pub fn resolve_soundfont(configured: Option<PathBuf>, env_value: Option<String>) -> Option<PathBuf> {
    configured.or_else(|| env_value.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = DatasetConfig::default();
        assert_eq!(config.name, "keys_new");
        assert_eq!(config.workers, 4);
        assert_eq!(config.roots.len(), 12);
        assert_eq!(config.modes, vec!["ionian".to_string()]);
        assert!(config.include_octave_above);
        assert_eq!(config.failure_policy, FailurePolicy::Skip);
        assert_eq!(config.dataset_dir(), PathBuf::from("./output/keys_new"));
        assert_eq!(config.keys().unwrap().len(), 12);
        assert_eq!(config.instruments(), default_instruments());
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DatasetConfig::from_json(
            r#"{
                "name": "minor_keys",
                "modes": ["aeolian", "dorian"],
                "workers": 2,
                "failure_policy": "abort",
                "instruments": [{"program": 40, "name": "Violin", "category": "Strings"}]
            }"#,
        )
        .unwrap();
        assert_eq!(config.name, "minor_keys");
        assert_eq!(config.workers, 2);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.out_root, PathBuf::from("./output"));
        assert_eq!(config.keys().unwrap().len(), 24);
        assert_eq!(config.instruments()[0].name, "Violin");
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(DatasetConfig::from_json(r#"{"wokers": 2}"#).is_err());
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = DatasetConfig {
            workers: 0,
            ..DatasetConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DatasetError::InvalidConfig { field: "workers", .. })
        ));

        config.workers = 1;
        config.name = "a/b".to_string();
        assert!(config.validate().is_err());

        config.name = "ok".to_string();
        config.sample_rate = 100;
        assert!(matches!(
            config.validate(),
            Err(DatasetError::InvalidConfig { field: "sample_rate", .. })
        ));
    }

    #[test]
    fn test_bad_mode_is_enumeration_error() {
        let config = DatasetConfig {
            modes: vec!["bebop".to_string()],
            ..DatasetConfig::default()
        };
        assert_eq!(config.keys().unwrap_err().code(), "DATASET_001");
    }

    #[test]
    fn test_resolve_soundfont() {
        let configured = Some(PathBuf::from("a.sf2"));
        assert_eq!(
            resolve_soundfont(configured.clone(), Some("b.sf2".to_string())),
            configured
        );
        assert_eq!(
            resolve_soundfont(None, Some("b.sf2".to_string())),
            Some(PathBuf::from("b.sf2"))
        );
        assert_eq!(resolve_soundfont(None, Some("  ".to_string())), None);
        assert_eq!(resolve_soundfont(None, None), None);
    }

    #[test]
    fn test_failure_policy_from_str() {
        assert_eq!("ABORT".parse::<FailurePolicy>().unwrap(), FailurePolicy::Abort);
        assert!("retry".parse::<FailurePolicy>().is_err());
    }

    #[test]
    fn test_builtin_renderer_without_soundfont() {
        let renderer = DatasetConfig::default().build_renderer().unwrap();
        assert_eq!(renderer.soundfont_id(), "builtin-sine");
    }
}
