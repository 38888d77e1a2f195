//! Resolves the effective dataset config from a file, flags, and the
//! environment.
//!
//! Precedence, highest first: command-line flags, config file, the
//! `SCALESET_SOUNDFONT` environment variable (soundfont only), defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use scaleset_dataset::{resolve_soundfont, DatasetConfig, FailurePolicy, SOUNDFONT_ENV};
use scaleset_spec::InstrumentDescriptor;

/// Values given on the command line. `None` / empty means "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Dataset name.
    pub name: Option<String>,
    /// Parent directory.
    pub out_root: Option<PathBuf>,
    /// Root note names.
    pub roots: Vec<String>,
    /// Mode names.
    pub modes: Vec<String>,
    /// General MIDI program numbers.
    pub programs: Vec<u8>,
    /// Worker pool size.
    pub workers: Option<usize>,
    /// SoundFont path.
    pub soundfont: Option<PathBuf>,
    /// Drop the octave above the tonic.
    pub no_octave: bool,
    /// Row failure handling.
    pub failure_policy: Option<FailurePolicy>,
    /// Silence threshold.
    pub silence_threshold: Option<f32>,
    /// Sample rate.
    pub sample_rate: Option<u32>,
}

impl ConfigOverrides {
    /// Applies the overrides on top of `config`.
    pub fn apply(&self, config: &mut DatasetConfig) -> Result<()> {
        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(out_root) = &self.out_root {
            config.out_root = out_root.clone();
        }
        if !self.roots.is_empty() {
            config.roots = self.roots.clone();
        }
        if !self.modes.is_empty() {
            config.modes = self.modes.clone();
        }
        if !self.programs.is_empty() {
            let instruments = self
                .programs
                .iter()
                .map(|&p| InstrumentDescriptor::general_midi(p))
                .collect::<Result<Vec<_>, _>>()
                .context("Invalid --programs value")?;
            config.instruments = Some(instruments);
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(soundfont) = &self.soundfont {
            config.soundfont = Some(soundfont.clone());
        }
        if self.no_octave {
            config.include_octave_above = false;
        }
        if let Some(policy) = self.failure_policy {
            config.failure_policy = policy;
        }
        if let Some(threshold) = self.silence_threshold {
            config.silence_threshold = threshold;
        }
        if let Some(rate) = self.sample_rate {
            config.sample_rate = rate;
        }
        Ok(())
    }
}

/// Builds the effective config.
///
/// # Arguments
/// * `path` - Optional JSON config file
/// * `overrides` - Command-line values
/// * `env_soundfont` - Value of `SCALESET_SOUNDFONT`, if set
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
    env_soundfont: Option<String>,
) -> Result<DatasetConfig> {
    let mut config = match path {
        Some(path) => DatasetConfig::load(path)?,
        None => DatasetConfig::default(),
    };
    overrides.apply(&mut config)?;
    config.soundfont = resolve_soundfont(config.soundfont.take(), env_soundfont);
    config.validate()?;
    Ok(config)
}

/// Reads `SCALESET_SOUNDFONT` from the process environment.
pub fn env_soundfont() -> Option<String> {
    std::env::var(SOUNDFONT_ENV).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_without_file_or_flags() {
        let config = resolve_config(None, &ConfigOverrides::default(), None).unwrap();
        assert_eq!(config, DatasetConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaleset.json");
        std::fs::write(
            &path,
            r#"{"name": "from_file", "workers": 8, "modes": ["lydian"], "soundfont": "file.sf2"}"#,
        )
        .unwrap();

        let overrides = ConfigOverrides {
            workers: Some(2),
            programs: vec![40, 41],
            no_octave: true,
            ..ConfigOverrides::default()
        };
        let config = resolve_config(Some(&path), &overrides, Some("env.sf2".to_string())).unwrap();

        assert_eq!(config.name, "from_file");
        assert_eq!(config.workers, 2);
        assert_eq!(config.modes, vec!["lydian".to_string()]);
        assert_eq!(config.soundfont, Some(PathBuf::from("file.sf2")));
        assert!(!config.include_octave_above);
        let instruments = config.instruments();
        let names: Vec<&str> = instruments.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Violin", "Viola"]);
    }

    #[test]
    fn test_env_soundfont_is_last_resort() {
        let config =
            resolve_config(None, &ConfigOverrides::default(), Some("env.sf2".to_string())).unwrap();
        assert_eq!(config.soundfont, Some(PathBuf::from("env.sf2")));
    }

    #[test]
    fn test_invalid_program_rejected() {
        let overrides = ConfigOverrides {
            programs: vec![200],
            ..ConfigOverrides::default()
        };
        assert!(resolve_config(None, &overrides, None).is_err());
    }

    #[test]
    fn test_invalid_workers_rejected() {
        let overrides = ConfigOverrides {
            workers: Some(0),
            ..ConfigOverrides::default()
        };
        let err = resolve_config(None, &overrides, None).unwrap_err();
        assert!(err.to_string().contains("workers"));
    }
}
