//! Batch processing over file lists and directory trees.
//!
//! Files are processed strictly one at a time, in order. Folder mode walks
//! the tree depth-first with entries sorted by file name, so one run's order
//! is reproducible. There is no rollback: files rewritten before a failure
//! stay rewritten.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::date::{TimeOffset, format_exif_datetime};
use crate::error::ShiftError;
use crate::shift::{ShiftOutcome, shift_file};

/// One unit of batch work: a file to shift and the offset to apply.
#[derive(Debug, Clone)]
pub struct ShiftJob {
    pub path: PathBuf,
    pub offset: TimeOffset,
}

/// Terminal state of one job in a [`BatchReport`].
#[derive(Debug)]
pub enum JobOutcome {
    Succeeded {
        previous: NaiveDateTime,
        updated: NaiveDateTime,
    },
    Skipped,
    Failed(ShiftError),
}

/// Result of one job, keyed by the file it ran against.
#[derive(Debug)]
pub struct JobResult {
    pub path: PathBuf,
    pub outcome: JobOutcome,
}

/// Per-file outcomes of a batch run, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<JobResult>,
}

impl BatchReport {
    pub fn shifted(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Succeeded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&JobOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }

    fn record(&mut self, path: PathBuf, outcome: JobOutcome) {
        self.results.push(JobResult { path, outcome });
    }
}

/// A batch that stopped at its first failure.
///
/// Carries the failing file, the underlying error, and the report for
/// everything processed before the abort (those rewrites stand).
#[derive(Debug, Error)]
#[error("batch aborted at {}: {source}", .path.display())]
pub struct BatchError {
    pub path: PathBuf,
    pub source: ShiftError,
    pub report: BatchReport,
}

/// Run jobs in order, applying the per-job failure policy.
///
/// With `ignore_errors` a failed job is recorded and processing moves on;
/// without it the first failure aborts the batch and is surfaced as
/// [`BatchError`]. Files without EXIF metadata are recorded as
/// [`JobOutcome::Skipped`] under either policy.
pub fn run_jobs(
    jobs: impl IntoIterator<Item = ShiftJob>,
    ignore_errors: bool,
) -> Result<BatchReport, BatchError> {
    let mut report = BatchReport::default();

    for job in jobs {
        log::info!("Processing {}", job.path.display());
        match shift_file(&job.path, &job.offset) {
            Ok(ShiftOutcome::Shifted { previous, updated }) => {
                log::info!(
                    "  {} -> {}",
                    format_exif_datetime(&previous),
                    format_exif_datetime(&updated)
                );
                report.record(job.path, JobOutcome::Succeeded { previous, updated });
            }
            Ok(ShiftOutcome::Skipped) => {
                report.record(job.path, JobOutcome::Skipped);
            }
            Err(e) if ignore_errors => {
                log::warn!("Couldn't process {}: {e}", job.path.display());
                report.record(job.path, JobOutcome::Failed(e));
            }
            Err(e) => {
                return Err(BatchError {
                    path: job.path,
                    source: e,
                    report,
                });
            }
        }
    }

    Ok(report)
}

/// Shift an explicit list of files, in the given order.
pub fn shift_files(
    paths: &[PathBuf],
    offset: &TimeOffset,
    ignore_errors: bool,
) -> Result<BatchReport, BatchError> {
    run_jobs(
        paths.iter().map(|path| ShiftJob {
            path: path.clone(),
            offset: *offset,
        }),
        ignore_errors,
    )
}

/// Shift every regular file under `root`.
pub fn shift_folder(
    root: &Path,
    offset: &TimeOffset,
    ignore_errors: bool,
) -> Result<BatchReport, BatchError> {
    shift_files(&collect_files(root), offset, ignore_errors)
}

/// Depth-first list of every regular file under `root`.
///
/// Entries are sorted by file name within each directory, which makes the
/// traversal order stable from run to run. Symlinks are followed;
/// directories themselves are never returned.
pub fn collect_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}
