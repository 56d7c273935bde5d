//! # exif-shift
//!
//! Shift the capture timestamp (EXIF DateTimeOriginal) embedded in JPEG
//! images by a configurable offset, rewriting each file losslessly — every
//! non-EXIF segment and all scan data are copied byte-for-byte, only the
//! EXIF APP1 segment is re-encoded.
//!
//! ## Quick Start
//!
//! Shift one file, or a whole directory tree with per-file failure policy:
//!
//! ```rust,no_run
//! use exif_shift::batch::shift_folder;
//! use exif_shift::date::TimeOffset;
//! use exif_shift::shift::shift_file;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Move one photo two hours forward
//!     let offset = TimeOffset::new(0, 2, 0, 0);
//!     shift_file(Path::new("photo.jpg"), &offset)?;
//!
//!     // Move a whole shoot back a day, continuing past broken files
//!     let report = shift_folder(Path::new("./photos"), &TimeOffset::new(-1, 0, 0, 0), true)?;
//!     println!(
//!         "{} shifted, {} skipped, {} failed",
//!         report.shifted(),
//!         report.skipped(),
//!         report.failed()
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Behavior notes
//!
//! - Files without EXIF metadata are skipped, never failed.
//! - Offset arithmetic uses proleptic Gregorian carry rules on naive local
//!   timestamps (EXIF dates carry no timezone); no DST adjustment applies.
//! - Replacement stages the patched bytes to a `.tmp` sibling and renames it
//!   over the original, so a failure mid-write leaves the original intact.
//! - Nothing is retried: a reported failure means the file was not modified
//!   (or, for a rename failure, that the original is still in place).
//!
//! ## Modules
//!
//! - [`date`] — EXIF date-time codec and [`date::TimeOffset`] arithmetic
//! - [`exif`] — metadata reading and lossless capture-date patching
//! - [`replace`] — staged temp-file swap
//! - [`shift`] — per-file orchestration
//! - [`batch`] — file-list and folder runs with outcome reports
//! - [`error`] — typed errors per concern

pub mod batch;
pub mod date;
pub mod error;
pub mod exif;
pub mod replace;
pub mod shift;

#[cfg(test)]
pub(crate) mod testutil {
    use little_exif::exif_tag::ExifTag;
    use little_exif::metadata::Metadata;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Minimal JPEG scaffold: SOI, JFIF APP0, a stub SOS with a few bytes of
    /// entropy data, EOI. Not decodable, but segment parsers accept it.
    pub(crate) fn minimal_jpeg() -> Vec<u8> {
        vec![
            0xFF, 0xD8, // SOI
            0xFF, 0xE0, // APP0 marker
            0x00, 0x10, // length: 16
            b'J', b'F', b'I', b'F', 0x00, // identifier
            0x01, 0x01, // version 1.1
            0x00, // aspect ratio units: none
            0x00, 0x01, // X density
            0x00, 0x01, // Y density
            0x00, 0x00, // no thumbnail
            0xFF, 0xDA, // SOS marker
            0x00, 0x08, // length: 8
            0x01, 0x01, 0x00, // one component
            0x00, 0x3F, 0x00, // spectral selection
            0x12, 0x34, 0x56, 0x78, // entropy-coded stub
            0xFF, 0xD9, // EOI
        ]
    }

    /// Write a JPEG fixture carrying a DateTimeOriginal tag.
    pub(crate) fn jpeg_with_capture_date(dir: &Path, name: &str, stamp: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, minimal_jpeg()).unwrap();
        let mut meta = Metadata::new();
        meta.set_tag(ExifTag::DateTimeOriginal(stamp.to_string()));
        meta.write_to_file(&path).unwrap();
        path
    }
}
