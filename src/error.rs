//! Error types for exif-shift.

use std::path::PathBuf;
use thiserror::Error;

/// Failures in EXIF date-time string handling and offset arithmetic.
#[derive(Debug, Error)]
pub enum DateError {
    #[error("timestamp {0:?} does not match the EXIF pattern YYYY:MM:DD HH:MM:SS")]
    Pattern(String),

    #[error("shifted timestamp falls outside the representable calendar range")]
    OutOfRange,
}

/// Failures while reading a JPEG byte source into a metadata handle.
///
/// `NoMetadata` is a skip condition, not a fault — callers that process
/// batches treat it as "nothing to do for this file" while `Io` and
/// `Corrupt` are reported.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("no EXIF metadata present")]
    NoMetadata,

    #[error("corrupt image metadata: {0}")]
    Corrupt(String),
}

/// Failures while splicing a modified EXIF directory back into the JPEG.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("no EXIF segment to patch")]
    NoExif,

    #[error("failed to serialize modified EXIF directory: {0}")]
    Serialize(String),
}

/// Failures while swapping the patched output over the original file.
#[derive(Debug, Error)]
pub enum ReplaceError {
    #[error("temporary file {} already exists", .0.display())]
    TempCollision(PathBuf),

    #[error("failed to write temporary file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to move {} over {}: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Any failure that can abort the shift of a single file.
#[derive(Debug, Error)]
pub enum ShiftError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("image has no capture date tag")]
    MissingCaptureDate,

    #[error(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error(transparent)]
    Replace(#[from] ReplaceError),
}
