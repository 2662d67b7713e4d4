//! Fixed-size worker pool for multi-file runs.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::output::progress;
use crate::pipeline::{FileStatus, ProcessOptions, run_file};
use rayon::prelude::*;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

/// A file that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    /// Input file.
    pub path: PathBuf,
    /// Why it failed.
    pub error: Error,
}

/// Outcome of a multi-file run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Files with outputs written.
    pub processed: usize,
    /// Files skipped because their output exists.
    pub skipped: usize,
    /// Files where no group survived ranking.
    pub empty: usize,
    /// Files that failed, in input order.
    pub failed: Vec<FileFailure>,
}

impl BatchSummary {
    /// Whether every file finished without error.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, path: PathBuf, result: Result<FileStatus>) {
        match result {
            Ok(FileStatus::Processed(_)) => self.processed += 1,
            Ok(FileStatus::Empty(_)) => self.empty += 1,
            Ok(FileStatus::Skipped) => self.skipped += 1,
            Err(e) => {
                error!("Failed to process {}: {}", path.display(), e);
                self.failed.push(FileFailure { path, error: e });
            }
        }
    }
}

/// Process `files` on a pool of `settings.workers` threads.
///
/// Each file runs to completion on one worker. A failing or panicking file
/// is recorded and the others carry on. With `fail_fast`, files not yet
/// started after the first failure are left alone and that failure is
/// returned as the error. Failures are reported in input order.
pub fn run_batch(
    files: &[PathBuf],
    settings: &Settings,
    options: &ProcessOptions,
) -> Result<BatchSummary> {
    let workers = settings.workers.min(files.len()).max(1);
    info!("Processing {} file(s) with {} worker(s)", files.len(), workers);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("grouper-worker-{i}"))
        .build()
        .map_err(|e| Error::ThreadPool { source: e })?;

    let stop = AtomicBool::new(false);
    let file_progress = progress::create_file_progress(files.len(), options.progress);

    let outcomes: Vec<(&PathBuf, Option<Result<FileStatus>>)> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                if stop.load(Ordering::Relaxed) {
                    debug!("Not started after failure: {}", path.display());
                    return (path, None);
                }
                let result = run_guarded(path, settings, options);
                if result.is_err() && options.fail_fast {
                    stop.store(true, Ordering::Relaxed);
                }
                progress::inc_progress(file_progress.as_ref());
                (path, Some(result))
            })
            .collect()
    });

    let mut summary = BatchSummary::default();
    for (path, result) in outcomes {
        if let Some(result) = result {
            summary.record(path.clone(), result);
        }
    }

    progress::finish_progress(
        file_progress,
        if summary.is_success() { "Complete" } else { "Completed with errors" },
    );

    info!(
        "Complete: {} processed, {} skipped, {} empty, {} failed",
        summary.processed,
        summary.skipped,
        summary.empty,
        summary.failed.len()
    );

    if options.fail_fast && !summary.failed.is_empty() {
        return Err(summary.failed.remove(0).error);
    }
    if !summary.is_success() {
        warn!("{} file(s) had errors", summary.failed.len());
    }

    Ok(summary)
}

/// Run one file, turning a panic into [`Error::WorkerPanicked`].
fn run_guarded(path: &Path, settings: &Settings, options: &ProcessOptions) -> Result<FileStatus> {
    guard(path, || run_file(path, settings, options, false))
}

fn guard<F>(path: &Path, work: F) -> Result<FileStatus>
where
    F: FnOnce() -> Result<FileStatus>,
{
    catch_unwind(AssertUnwindSafe(work)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(Error::WorkerPanicked {
            path: path.to_path_buf(),
            message,
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{Config, Stage, validate_config};
    use tempfile::TempDir;

    fn settings(workers: usize) -> Settings {
        let mut config = Config::default();
        config.runtime.workers = Some(workers);
        validate_config(&config).unwrap()
    }

    fn options(stage: Stage, fail_fast: bool) -> ProcessOptions {
        ProcessOptions {
            stage,
            fail_fast,
            ..ProcessOptions::default()
        }
    }

    #[test]
    fn test_batch_counts_each_outcome() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.csv");
        let done = dir.path().join("done.csv");
        let bad = dir.path().join("bad.csv");
        std::fs::write(&good, "locality\nRanch\n").unwrap();
        std::fs::write(&done, "locality\nCreek\n").unwrap();
        std::fs::write(dir.path().join("done-normalized.csv"), "").unwrap();
        std::fs::write(&bad, "id\n1\n").unwrap();

        let summary = run_batch(
            &[good, done, bad.clone()],
            &settings(2),
            &options(Stage::Normalize, false),
        )
        .unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].path, bad);
        assert!(matches!(
            summary.failed[0].error,
            Error::SchemaMissing { .. }
        ));
    }

    #[test]
    fn test_fail_fast_returns_error() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("bad.csv");
        std::fs::write(&bad, "id\n1\n").unwrap();

        let result = run_batch(&[bad], &settings(1), &options(Stage::Normalize, true));
        assert!(matches!(result, Err(Error::SchemaMissing { .. })));
    }

    #[test]
    fn test_panicking_file_becomes_error() {
        let err = guard(Path::new("x.csv"), || panic!("bad row"));
        match err {
            Err(Error::WorkerPanicked { path, message }) => {
                assert_eq!(path, PathBuf::from("x.csv"));
                assert_eq!(message, "bad row");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_failures_are_reported_in_input_order() {
        let dir = TempDir::new().unwrap();
        let files: Vec<PathBuf> = (0..4)
            .map(|i| {
                let path = dir.path().join(format!("bad-{i}.csv"));
                std::fs::write(&path, "id\n1\n").unwrap();
                path
            })
            .collect();

        let summary = run_batch(&files, &settings(3), &options(Stage::Normalize, false)).unwrap();
        let failed: Vec<&PathBuf> = summary.failed.iter().map(|f| &f.path).collect();
        assert_eq!(failed, files.iter().collect::<Vec<_>>());
    }
}
