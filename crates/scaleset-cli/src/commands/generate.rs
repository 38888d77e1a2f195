//! Generate command implementation
//!
//! Runs the full pipeline and prints a summary. Rows are synthesized in
//! parallel; failed rows are listed but do not stop the run unless the
//! abort policy is configured.

use anyhow::{Context, Result};
use colored::Colorize;
use scaleset_dataset::{generate_dataset, DatasetConfig, DatasetReport, RowFailure};
use serde::Serialize;
use std::process::ExitCode;

use super::print_banner;

/// Machine-readable summary of a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateSummary {
    /// Dataset name.
    pub name: String,
    /// Dataset directory.
    pub dataset_dir: String,
    /// Soundfont identifier.
    pub soundfont: String,
    /// Report timestamp.
    pub generated_at: String,
    /// Rows dispatched.
    pub total_rows: usize,
    /// Rows with a result.
    pub succeeded: usize,
    /// Rows that failed.
    pub failed: usize,
    /// Silent result rows.
    pub silent_count: usize,
    /// Silence warning, if any row is silent.
    pub warning: Option<String>,
    /// Runtime in seconds.
    pub runtime_seconds: f64,
    /// Failed rows.
    pub failures: Vec<RowFailure>,
}

impl GenerateSummary {
    /// Summarizes a report written under `config`'s dataset directory.
    pub fn from_report(config: &DatasetConfig, report: &DatasetReport) -> Self {
        Self {
            name: report.name.clone(),
            dataset_dir: config.dataset_dir().display().to_string(),
            soundfont: report.soundfont.clone(),
            generated_at: report.generated_at.clone(),
            total_rows: report.total_rows,
            succeeded: report.rows.len(),
            failed: report.failures.len(),
            silent_count: report.silent_count,
            warning: report.silence_warning(),
            runtime_seconds: report.runtime_seconds,
            failures: report.failures.clone(),
        }
    }

    /// Exit code: 0 when every row succeeded, 1 otherwise.
    pub fn exit_code(&self) -> ExitCode {
        if self.failed > 0 {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Run the generate command
///
/// # Arguments
/// * `config` - Resolved dataset config
/// * `json` - Print a JSON summary instead of colored text
///
/// # Returns
/// Exit code: 0 success, 1 if any row failed
pub fn run(config: &DatasetConfig, json: bool) -> Result<ExitCode> {
    if !json {
        print_banner("Scaleset Dataset Generator");
        println!("{} {}", "Dataset:".blue().bold(), config.name);
        println!(
            "{} {}",
            "Output directory:".blue().bold(),
            config.dataset_dir().display()
        );
        println!(
            "{} {}",
            "Soundfont:".blue().bold(),
            config
                .soundfont
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in sine".to_string())
        );
        println!("{} {}", "Workers:".blue().bold(), config.workers);
        println!();
    }

    let report = generate_dataset(config)
        .with_context(|| format!("Failed to generate dataset '{}'", config.name))?;
    let summary = GenerateSummary::from_report(config, &report);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        );
        return Ok(summary.exit_code());
    }

    print_banner("Generation Summary");
    println!("{} {}", "Total rows:".blue().bold(), summary.total_rows);
    println!("{} {}", "Successful:".green().bold(), summary.succeeded);
    println!("{} {}", "Failed:".red().bold(), summary.failed);
    println!("{} {}", "Silent:".yellow().bold(), summary.silent_count);
    println!(
        "{} {:.2}s",
        "Total runtime:".blue().bold(),
        summary.runtime_seconds
    );
    println!();

    if !summary.failures.is_empty() {
        println!("{}", "Failed rows:".red().bold());
        for failure in &summary.failures {
            println!(
                "  - [{}] {}: {} {}",
                failure.index,
                failure.base_filename,
                failure.message,
                format!("({})", failure.code).dimmed()
            );
        }
        println!();
    }

    if let Some(warning) = &summary.warning {
        println!("{} {}", "WARNING".yellow().bold(), warning);
        println!();
    }

    println!("{} {}", "Outputs saved to:".blue().bold(), summary.dataset_dir);

    Ok(summary.exit_code())
}
