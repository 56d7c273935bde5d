//! Per-file shift orchestration: read, extract, compute, rewrite, replace.

use chrono::NaiveDateTime;
use std::path::Path;

use crate::date::{TimeOffset, format_exif_datetime};
use crate::error::{MetadataError, ShiftError};
use crate::exif;
use crate::replace::replace_file;

/// Terminal state of one file after [`shift_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOutcome {
    /// The capture date was rewritten on disk.
    Shifted {
        previous: NaiveDateTime,
        updated: NaiveDateTime,
    },
    /// The file carries no EXIF metadata; nothing to do.
    Skipped,
}

/// Shift the capture date of a single JPEG file by `offset`.
///
/// Steps run in order — read, extract date, compute the shifted date,
/// rewrite the metadata segment, swap the file — and the first failure
/// aborts the remainder for this file. A file without EXIF metadata is a
/// clean [`ShiftOutcome::Skipped`], not an error.
pub fn shift_file(path: &Path, offset: &TimeOffset) -> Result<ShiftOutcome, ShiftError> {
    let handle = match exif::read_image_file(path) {
        Ok(handle) => handle,
        Err(MetadataError::NoMetadata) => {
            log::info!("Skipping {} (no EXIF metadata)", path.display());
            return Ok(ShiftOutcome::Skipped);
        }
        Err(e) => return Err(e.into()),
    };

    let previous = exif::capture_date(&handle)?;
    let updated = offset.apply(previous)?;
    log::debug!(
        "{}: {} -> {}",
        path.display(),
        format_exif_datetime(&previous),
        format_exif_datetime(&updated)
    );

    let patched = exif::rewrite_capture_date(handle, &updated)?;
    replace_file(path, &patched)?;

    Ok(ShiftOutcome::Shifted { previous, updated })
}

/// Look up the capture date of a single JPEG file without modifying it.
pub fn read_capture_date(path: &Path) -> Result<NaiveDateTime, ShiftError> {
    let handle = exif::read_image_file(path)?;
    exif::capture_date(&handle)
}
