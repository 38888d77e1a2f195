//! Plan command implementation
//!
//! Enumerates the rows a config would generate without writing anything.

use anyhow::{Context, Result};
use colored::Colorize;
use scaleset_dataset::{plan_rows, DatasetConfig};
use scaleset_spec::ParameterRow;
use serde::Serialize;
use std::process::ExitCode;

use super::print_banner;

/// One planned row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRow {
    /// Row index.
    pub index: usize,
    /// Root note.
    pub root: String,
    /// Mode.
    pub mode: String,
    /// Play direction label.
    pub direction: String,
    /// MIDI program.
    pub program: u8,
    /// Instrument name.
    pub instrument: String,
    /// Base file name of the row's artifacts.
    pub base_filename: String,
}

impl From<&ParameterRow> for PlannedRow {
    fn from(row: &ParameterRow) -> Self {
        Self {
            index: row.index,
            root: row.key.root.name().to_string(),
            mode: row.key.mode.name().to_string(),
            direction: row.direction_label().to_string(),
            program: row.instrument.program,
            instrument: row.instrument.name.clone(),
            base_filename: row.base_filename(),
        }
    }
}

/// Enumerates the planned rows for a config.
pub fn planned_rows(config: &DatasetConfig) -> Result<Vec<PlannedRow>> {
    let rows = plan_rows(config).context("Invalid dataset input")?;
    Ok(rows.iter().map(PlannedRow::from).collect())
}

/// Run the plan command
///
/// # Arguments
/// * `config` - Resolved dataset config
/// * `json` - Print rows as JSON
///
/// # Returns
/// Exit code: always 0 on success
pub fn run(config: &DatasetConfig, json: bool) -> Result<ExitCode> {
    let rows = planned_rows(config)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).context("Failed to serialize plan")?
        );
        return Ok(ExitCode::SUCCESS);
    }

    print_banner("Scaleset Dataset Plan");
    for row in &rows {
        println!(
            "  {:>5}  {:<3} {:<17} {:<11} {:>3} {}",
            row.index,
            row.root,
            row.mode,
            row.direction,
            row.program,
            row.instrument.dimmed()
        );
    }
    println!();
    println!(
        "{} {} rows into {}",
        "INFO".blue().bold(),
        rows.len(),
        config.dataset_dir().display()
    );

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_planned_rows_for_two_keys() {
        let config = DatasetConfig {
            roots: vec!["C".to_string(), "D".to_string()],
            ..DatasetConfig::default()
        };
        let rows = planned_rows(&config).unwrap();
        let summary: Vec<(usize, &str, &str)> = rows
            .iter()
            .map(|r| (r.index, r.root.as_str(), r.direction.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, "C", "ASCENDING"),
                (1, "C", "DESCENDING"),
                (2, "D", "ASCENDING"),
                (3, "D", "DESCENDING"),
            ]
        );
        assert_eq!(
            rows[3].base_filename,
            "D_ionian_DESCENDING_0_Acoustic_Grand_Piano"
        );
    }

    #[test]
    fn test_plan_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatasetConfig {
            out_root: dir.path().to_path_buf(),
            ..DatasetConfig::default()
        };
        run(&config, true).unwrap();
        assert!(!config.dataset_dir().exists());
    }
}
