//! CLI argument definitions for the Scaleset command-line interface.
//!
//! All `#[derive(Parser)]`, `#[derive(Subcommand)]`, and `#[derive(Args)]`
//! types live here, keeping `main.rs` focused on dispatch logic.

use clap::{Args, Parser, Subcommand};
use scaleset_cli::config::ConfigOverrides;
use scaleset_dataset::FailurePolicy;
use std::path::PathBuf;

/// Scaleset - labeled scale dataset generator (MIDI + WAV + metadata)
#[derive(Parser)]
#[command(name = "scaleset")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate a dataset: one MIDI file, one WAV file, and one metadata row per combination
    Generate {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output a machine-readable JSON summary (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the rows a dataset would contain without writing anything
    Plan {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recount silent rows in a generated dataset
    Audit {
        /// Dataset directory containing metadata.json
        #[arg(long)]
        dataset: PathBuf,

        /// Re-run silence detection on every WAV file
        #[arg(long)]
        recheck: bool,

        /// Peak amplitude threshold used with --recheck
        #[arg(long)]
        threshold: Option<f32>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List General MIDI instruments
    Instruments {
        /// Only list this category (e.g. "Strings")
        #[arg(long)]
        category: Option<String>,

        /// Output the list as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Dataset parameters shared by `generate` and `plan`.
#[derive(Args, Debug, Default)]
pub(crate) struct ConfigArgs {
    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Dataset name (directory under the output root)
    #[arg(long)]
    pub name: Option<String>,

    /// Output root directory
    #[arg(short, long)]
    pub out_root: Option<PathBuf>,

    /// Root notes, comma-separated (default: all twelve)
    #[arg(long, value_delimiter = ',')]
    pub roots: Vec<String>,

    /// Modes, comma-separated (default: ionian)
    #[arg(long, value_delimiter = ',')]
    pub modes: Vec<String>,

    /// General MIDI program numbers, comma-separated (default: 0)
    #[arg(long, value_delimiter = ',')]
    pub programs: Vec<u8>,

    /// Worker pool size
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// SoundFont (.sf2) to render with (default: $SCALESET_SOUNDFONT, else built-in sine)
    #[arg(long)]
    pub soundfont: Option<PathBuf>,

    /// Do not end melodies on the octave above the tonic
    #[arg(long)]
    pub no_octave: bool,

    /// What to do when a row fails (skip, abort)
    #[arg(long)]
    pub failure_policy: Option<FailurePolicy>,

    /// Peak amplitude below which a rendering counts as silent
    #[arg(long)]
    pub silence_threshold: Option<f32>,

    /// Render sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<u32>,
}

impl ConfigArgs {
    /// Command-line values to layer over the config file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            name: self.name.clone(),
            out_root: self.out_root.clone(),
            roots: self.roots.clone(),
            modes: self.modes.clone(),
            programs: self.programs.clone(),
            workers: self.workers,
            soundfont: self.soundfont.clone(),
            no_octave: self.no_octave,
            failure_policy: self.failure_policy,
            silence_threshold: self.silence_threshold,
            sample_rate: self.sample_rate,
        }
    }
}
