//! Audit command implementation
//!
//! Re-reads a dataset's `metadata.json` and recounts silent rows. With
//! `--recheck`, every WAV is analyzed again and rows whose recorded silence
//! flag no longer matches are reported.

use anyhow::{Context, Result};
use colored::Colorize;
use scaleset_backend_audio::{AudioAnalysis, SilenceDetector, DEFAULT_SILENCE_THRESHOLD};
use scaleset_dataset::{silence_warning, DatasetReport};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::print_banner;

/// A row whose audio could not be re-analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadableRow {
    /// Row index.
    pub index: usize,
    /// Audio path relative to the dataset directory.
    pub path: String,
    /// Error message.
    pub error: String,
}

/// Result of auditing a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditOutput {
    /// Dataset directory.
    pub dataset: String,
    /// Result rows in the report.
    pub rows: usize,
    /// Silent count stored in the report.
    pub recorded_silent: usize,
    /// Silent count after this audit.
    pub silent_count: usize,
    /// Whether the audio was re-analyzed.
    pub rechecked: bool,
    /// Indices whose silence flag changed on recheck.
    pub changed: Vec<usize>,
    /// Rows whose audio could not be read.
    pub unreadable: Vec<UnreadableRow>,
    /// Silence warning, if any row is silent.
    pub warning: Option<String>,
}

/// Audits a dataset directory.
///
/// # Arguments
/// * `dataset` - Dataset directory containing `metadata.json`
/// * `recheck` - Re-run silence detection on every WAV
/// * `threshold` - Peak threshold for recheck (default 0.001)
pub fn audit(dataset: &Path, recheck: bool, threshold: Option<f32>) -> Result<AuditOutput> {
    let report = DatasetReport::load(dataset)
        .with_context(|| format!("Failed to load dataset report from {}", dataset.display()))?;

    let mut changed = Vec::new();
    let mut unreadable = Vec::new();
    let silent_count = if recheck {
        let detector = SilenceDetector::new(threshold.unwrap_or(DEFAULT_SILENCE_THRESHOLD))?;
        let mut silent = 0;
        for row in &report.rows {
            match AudioAnalysis::from_path(&dataset.join(&row.synth_file_path)) {
                Ok(analysis) => {
                    let is_silent = detector.classify(&analysis);
                    if is_silent {
                        silent += 1;
                    }
                    if is_silent != row.is_silent {
                        changed.push(row.index);
                    }
                }
                Err(e) => unreadable.push(UnreadableRow {
                    index: row.index,
                    path: row.synth_file_path.clone(),
                    error: e.to_string(),
                }),
            }
        }
        silent
    } else {
        report.rows.iter().filter(|r| r.is_silent).count()
    };

    Ok(AuditOutput {
        dataset: dataset.display().to_string(),
        rows: report.rows.len(),
        recorded_silent: report.silent_count,
        silent_count,
        rechecked: recheck,
        changed,
        unreadable,
        warning: silence_warning(silent_count),
    })
}

/// Run the audit command
///
/// # Arguments
/// * `dataset` - Dataset directory
/// * `recheck` - Re-run silence detection
/// * `threshold` - Optional peak threshold
/// * `json` - Print JSON output
///
/// # Returns
/// Exit code: 0 if every row could be checked (silent rows only warn),
/// 1 if any audio file was unreadable
pub fn run(dataset: &Path, recheck: bool, threshold: Option<f32>, json: bool) -> Result<ExitCode> {
    let output = audit(dataset, recheck, threshold)?;
    let code = if output.unreadable.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(code);
    }

    print_banner("Scaleset Dataset Audit");
    println!("{} {}", "Dataset:".blue().bold(), output.dataset);
    println!("{} {}", "Rows:".blue().bold(), output.rows);
    println!(
        "{} {} (recorded {})",
        "Silent:".yellow().bold(),
        output.silent_count,
        output.recorded_silent
    );
    if output.rechecked {
        println!(
            "{} {}",
            "Changed on recheck:".blue().bold(),
            output.changed.len()
        );
        for index in &output.changed {
            println!("  - row {}", index);
        }
    }
    for row in &output.unreadable {
        println!(
            "  {} row {} {}: {}",
            "!".red(),
            row.index,
            row.path,
            row.error
        );
    }
    if let Some(warning) = &output.warning {
        println!();
        println!("{} {}", "WARNING".yellow().bold(), warning);
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scaleset_backend_audio::write_pcm16;
    use scaleset_spec::ResultRow;

    fn row(index: usize, wav: &str, silent: bool) -> ResultRow {
        ResultRow {
            index,
            key_root_note: "C".to_string(),
            key_mode: "ionian".to_string(),
            play_style: "ASCENDING".to_string(),
            midi_program_num: 0,
            midi_program_name: "Acoustic Grand Piano".to_string(),
            midi_category: "Piano".to_string(),
            midi_file_path: format!("{}.mid", index),
            synth_file_path: wav.to_string(),
            synth_soundfont: "builtin-sine".to_string(),
            is_silent: silent,
        }
    }

    #[test]
    fn test_audit_counts_and_recheck() {
        let dir = tempfile::tempdir().unwrap();
        write_pcm16(&dir.path().join("quiet.wav"), 16_000, 1, &[0.0; 160]).unwrap();
        write_pcm16(&dir.path().join("loud.wav"), 16_000, 1, &[0.5; 160]).unwrap();

        // Row 1 was recorded audible but is actually silent.
        let report = DatasetReport::new(
            "d",
            "builtin-sine",
            vec![
                row(0, "loud.wav", false),
                row(1, "quiet.wav", false),
                row(2, "missing.wav", true),
            ],
            Vec::new(),
            0.0,
        );
        report.write(dir.path()).unwrap();

        let plain = audit(dir.path(), false, None).unwrap();
        assert_eq!(plain.silent_count, 1);
        assert_eq!(plain.recorded_silent, 1);
        assert!(plain.unreadable.is_empty());

        let rechecked = audit(dir.path(), true, None).unwrap();
        assert_eq!(rechecked.silent_count, 1);
        assert_eq!(rechecked.changed, vec![1]);
        assert_eq!(rechecked.unreadable.len(), 1);
        assert_eq!(rechecked.unreadable[0].index, 2);
        assert_eq!(
            rechecked.warning.as_deref(),
            Some("1 synthesized sample is silent")
        );
    }

    #[test]
    fn test_missing_report() {
        let dir = tempfile::tempdir().unwrap();
        let err = audit(dir.path(), false, None).unwrap_err();
        assert!(err.to_string().contains("Failed to load dataset report"));
    }
}
