//! Parallel dataset driver.
//!
//! Rows are dispatched to a bounded rayon pool. Each row runs in isolation;
//! a failure is recorded and never affects other rows. Results are
//! re-ordered by index before the report is written.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rayon::iter::{ParallelBridge, ParallelIterator};
use scaleset_spec::{ParameterRow, ResultRow, RowEnumerator};

use crate::config::{DatasetConfig, FailurePolicy, DEFAULT_WORKERS};
use crate::error::{DatasetError, DatasetResult, RowError};
use crate::report::{DatasetReport, RowFailure};
use crate::synthesizer::{RowProcessor, RowSynthesizer};

/// Runs a row processor over a row source and writes the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetWriter {
    name: String,
    out_root: PathBuf,
    workers: usize,
    failure_policy: FailurePolicy,
}

struct Outcome {
    index: usize,
    base_filename: String,
    result: Result<ResultRow, RowError>,
}

impl DatasetWriter {
    /// Creates a writer for `out_root/name` with the default pool size and
    /// the skip policy.
    pub fn new(name: impl Into<String>, out_root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            out_root: out_root.into(),
            workers: DEFAULT_WORKERS,
            failure_policy: FailurePolicy::Skip,
        }
    }

    /// Creates a writer from a run configuration.
    pub fn from_config(config: &DatasetConfig) -> Self {
        Self::new(config.name.clone(), config.out_root.clone())
            .with_workers(config.workers)
            .with_failure_policy(config.failure_policy)
    }

    /// Sets the worker pool size (at least 1).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Sets the row failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Dataset directory: `out_root/name`.
    pub fn dataset_dir(&self) -> PathBuf {
        self.out_root.join(&self.name)
    }

    /// Processes every row and writes `metadata.json` and `metadata.csv`.
    ///
    /// The dataset directory is created before any row is dispatched. Each
    /// row is processed exactly once unless the abort policy stops dispatch
    /// early, in which case the first failed row (by index) is returned as
    /// an error and no report is written.
    pub fn run<I, P>(&self, rows: I, processor: &P) -> DatasetResult<DatasetReport>
    where
        I: IntoIterator<Item = ParameterRow>,
        I::IntoIter: Send,
        P: RowProcessor + ?Sized,
    {
        let start = Instant::now();
        let dir = self.dataset_dir();
        std::fs::create_dir_all(&dir).map_err(|source| DatasetError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        ensure_writable(&dir)?;

        tracing::info!(
            dataset = %self.name,
            dir = %dir.display(),
            workers = self.workers,
            soundfont = processor.soundfont_id(),
            "starting dataset run"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| DatasetError::WorkerPool {
                message: e.to_string(),
            })?;

        let rows = rows.into_iter();
        let outcomes = pool.install(|| self.dispatch(rows, processor, &dir));

        let mut results = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(row) => results.push(row),
                Err(err) => {
                    tracing::warn!(
                        index = outcome.index,
                        row = %outcome.base_filename,
                        code = err.code(),
                        "row failed: {}",
                        err
                    );
                    failures.push(RowFailure {
                        index: outcome.index,
                        base_filename: outcome.base_filename,
                        code: err.code().to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }

        if self.failure_policy == FailurePolicy::Abort {
            if let Some(first) = failures.iter().min_by_key(|f| f.index) {
                return Err(DatasetError::Aborted {
                    index: first.index,
                    base_filename: first.base_filename.clone(),
                    message: first.message.clone(),
                });
            }
        }

        let report = DatasetReport::new(
            self.name.clone(),
            processor.soundfont_id(),
            results,
            failures,
            start.elapsed().as_secs_f64(),
        );
        report.write(&dir)?;

        if let Some(warning) = report.silence_warning() {
            tracing::warn!(dataset = %self.name, silent = report.silent_count, "{}", warning);
        }
        tracing::info!(
            dataset = %self.name,
            rows = report.rows.len(),
            failed = report.failures.len(),
            runtime_seconds = report.runtime_seconds,
            "dataset run finished"
        );

        Ok(report)
    }

    fn dispatch<K, P>(&self, rows: K, processor: &P, dir: &Path) -> Vec<Outcome>
    where
        K: Iterator<Item = ParameterRow> + Send,
        P: RowProcessor + ?Sized,
    {
        let stop = AtomicBool::new(false);
        rows.par_bridge()
            .filter_map(|row| {
                if stop.load(Ordering::Relaxed) {
                    return None;
                }
                let result = panic::catch_unwind(AssertUnwindSafe(|| processor.process(&row, dir)))
                    .unwrap_or_else(|payload| {
                        Err(RowError::Panicked {
                            message: panic_message(&*payload),
                        })
                    });
                match &result {
                    Ok(_) => tracing::debug!(index = row.index, row = %row.base_filename(), "row done"),
                    Err(_) if self.failure_policy == FailurePolicy::Abort => {
                        stop.store(true, Ordering::Relaxed);
                    }
                    Err(_) => {}
                }
                Some(Outcome {
                    index: row.index,
                    base_filename: row.base_filename(),
                    result,
                })
            })
            .collect()
    }
}

/// Creates and drops a scratch file so a read-only directory fails the run
/// before any row is dispatched.
fn ensure_writable(dir: &Path) -> DatasetResult<()> {
    tempfile::NamedTempFile::new_in(dir)
        .and_then(|scratch| scratch.close())
        .map_err(|source| DatasetError::DirNotWritable {
            path: dir.to_path_buf(),
            source,
        })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Enumerates the rows a config would produce, validating inputs.
///
/// Nothing is written to disk.
pub fn plan_rows(config: &DatasetConfig) -> DatasetResult<Vec<ParameterRow>> {
    config.validate()?;
    let enumerator = RowEnumerator::checked(config.keys()?, config.instruments())?;
    Ok(enumerator.collect())
}

/// Runs a full dataset generation from a config.
///
/// Inputs are validated and the renderer is loaded before the dataset
/// directory is created.
pub fn generate_dataset(config: &DatasetConfig) -> DatasetResult<DatasetReport> {
    config.validate()?;
    let enumerator = RowEnumerator::checked(config.keys()?, config.instruments())?;
    let renderer = config.build_renderer()?;
    let synthesizer = RowSynthesizer::new(renderer)
        .with_detector(config.silence_detector()?)
        .with_octave_above(config.include_octave_above);

    DatasetWriter::from_config(config).run(enumerator, &synthesizer)
}
