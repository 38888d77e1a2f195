//! Dataset report: the ordered result table, failures, and run metadata.
//!
//! Persisted as `metadata.json` (everything) and `metadata.csv` (result
//! rows only, one line per row in index order).

use std::path::{Path, PathBuf};

use scaleset_spec::ResultRow;
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, DatasetResult};

/// File name of the JSON report inside the dataset directory.
pub const METADATA_JSON: &str = "metadata.json";

/// File name of the CSV table inside the dataset directory.
pub const METADATA_CSV: &str = "metadata.csv";

/// A row that produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFailure {
    /// Index of the failed row.
    pub index: usize,
    /// Base file name of the failed row.
    pub base_filename: String,
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

/// Outcome of a dataset run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    /// Dataset name.
    pub name: String,
    /// RFC 3339 timestamp of report creation.
    pub generated_at: String,
    /// Soundfont identifier used for every row.
    pub soundfont: String,
    /// Rows dispatched to the processor.
    pub total_rows: usize,
    /// Number of silent result rows.
    pub silent_count: usize,
    /// Runtime in seconds.
    pub runtime_seconds: f64,
    /// Failed rows, ordered by index.
    pub failures: Vec<RowFailure>,
    /// Result rows, ordered by index.
    pub rows: Vec<ResultRow>,
}

impl DatasetReport {
    /// Builds a report, ordering rows and failures by index and counting
    /// silent rows.
    pub fn new(
        name: impl Into<String>,
        soundfont: impl Into<String>,
        mut rows: Vec<ResultRow>,
        mut failures: Vec<RowFailure>,
        runtime_seconds: f64,
    ) -> Self {
        rows.sort_by_key(|r| r.index);
        failures.sort_by_key(|f| f.index);
        let silent_count = count_silent(&rows);
        Self {
            name: name.into(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            soundfont: soundfont.into(),
            total_rows: rows.len() + failures.len(),
            silent_count,
            runtime_seconds,
            failures,
            rows,
        }
    }

    /// Whether every dispatched row produced a result.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Warning naming the silent-row count, or `None` when nothing is silent.
    pub fn silence_warning(&self) -> Option<String> {
        silence_warning(self.silent_count)
    }

    /// Writes `metadata.json` and `metadata.csv` into `dir`.
    pub fn write(&self, dir: &Path) -> DatasetResult<()> {
        self.write_json(&dir.join(METADATA_JSON))?;
        self.write_csv(&dir.join(METADATA_CSV))
    }

    /// Writes the full report as pretty JSON.
    pub fn write_json(&self, path: &Path) -> DatasetResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| DatasetError::report(path, e))?;
        std::fs::write(path, json).map_err(|e| DatasetError::report(path, e))
    }

    /// Writes the result table as CSV.
    pub fn write_csv(&self, path: &Path) -> DatasetResult<()> {
        std::fs::write(path, rows_to_csv(&self.rows)).map_err(|e| DatasetError::report(path, e))
    }

    /// Loads `metadata.json` from a dataset directory.
    pub fn load(dir: &Path) -> DatasetResult<Self> {
        let path: PathBuf = dir.join(METADATA_JSON);
        let text = std::fs::read_to_string(&path).map_err(|e| DatasetError::report(&path, e))?;
        serde_json::from_str(&text).map_err(|e| DatasetError::report(&path, e))
    }
}

/// Number of rows flagged silent.
pub fn count_silent(rows: &[ResultRow]) -> usize {
    rows.iter().filter(|r| r.is_silent).count()
}

/// Warning text for a positive silent-row count.
pub fn silence_warning(silent_count: usize) -> Option<String> {
    match silent_count {
        0 => None,
        1 => Some("1 synthesized sample is silent".to_string()),
        n => Some(format!("{} synthesized samples are silent", n)),
    }
}

/// Renders rows as CSV with a header line of [`ResultRow::COLUMNS`].
pub fn rows_to_csv(rows: &[ResultRow]) -> String {
    let mut csv = ResultRow::COLUMNS.join(",");
    csv.push('\n');
    for row in rows {
        let fields = [
            row.index.to_string(),
            csv_escape(&row.key_root_note),
            csv_escape(&row.key_mode),
            csv_escape(&row.play_style),
            row.midi_program_num.to_string(),
            csv_escape(&row.midi_program_name),
            csv_escape(&row.midi_category),
            csv_escape(&row.midi_file_path),
            csv_escape(&row.synth_file_path),
            csv_escape(&row.synth_soundfont),
            row.is_silent.to_string(),
        ];
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }
    csv
}

/// Quotes a CSV field when it contains a delimiter, quote, or line break.
fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(index: usize, silent: bool) -> ResultRow {
        ResultRow {
            index,
            key_root_note: "C".to_string(),
            key_mode: "ionian".to_string(),
            play_style: "ASCENDING".to_string(),
            midi_program_num: 0,
            midi_program_name: "Acoustic Grand Piano".to_string(),
            midi_category: "Piano".to_string(),
            midi_file_path: format!("row{}.mid", index),
            synth_file_path: format!("row{}.wav", index),
            synth_soundfont: "builtin-sine".to_string(),
            is_silent: silent,
        }
    }

    #[test]
    fn test_new_sorts_and_counts() {
        let failure = RowFailure {
            index: 1,
            base_filename: "x".to_string(),
            code: "ROW_001".to_string(),
            message: "boom".to_string(),
        };
        let report = DatasetReport::new(
            "keys_new",
            "builtin-sine",
            vec![result(3, true), result(0, false), result(2, true)],
            vec![failure],
            0.5,
        );
        let indices: Vec<usize> = report.rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 2, 3]);
        assert_eq!(report.total_rows, 4);
        assert_eq!(report.silent_count, 2);
        assert!(!report.is_complete());
        assert_eq!(
            report.silence_warning().as_deref(),
            Some("2 synthesized samples are silent")
        );
    }

    #[test]
    fn test_no_warning_when_nothing_silent() {
        let report = DatasetReport::new("d", "sf", vec![result(0, false)], Vec::new(), 0.0);
        assert_eq!(report.silence_warning(), None);
        assert_eq!(silence_warning(1).as_deref(), Some("1 synthesized sample is silent"));
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("hello"), "hello");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_rows_to_csv() {
        let mut row = result(0, false);
        row.midi_program_name = "Piano, Bright".to_string();
        let csv = rows_to_csv(&[row]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(csv.ends_with(",false\n"));
        assert!(lines[0].starts_with("index,key_root_note,key_mode,play_style"));
        assert_eq!(
            lines[1],
            "0,C,ionian,ASCENDING,0,\"Piano, Bright\",Piano,row0.mid,row0.wav,builtin-sine,false"
        );
    }

    #[test]
    fn test_write_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let report = DatasetReport::new("d", "sf", vec![result(0, true)], Vec::new(), 1.0);
        report.write(dir.path()).unwrap();

        assert!(dir.path().join(METADATA_CSV).is_file());
        let loaded = DatasetReport::load(dir.path()).unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn test_load_missing_is_report_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(DatasetReport::load(dir.path()).unwrap_err().code(), "DATASET_008");
    }
}
