//! EXIF metadata reading and capture-date patching.
//!
//! Two halves:
//!
//! - [`read_image`] / [`read_image_file`] — parse a JPEG byte source into an
//!   [`ImageMetadata`] handle (container segments plus editable tag model)
//! - [`capture_date`] / [`rewrite_capture_date`] — extract the
//!   DateTimeOriginal tag and splice a replacement value back into the
//!   APP1 segment without touching any other byte of the file
//!
//! The low-level TIFF tag encoding is delegated to `little_exif`; segment
//! bookkeeping is delegated to `img-parts`.

mod patcher;
mod reader;

pub use patcher::{capture_date, rewrite_capture_date};
pub use reader::{ImageMetadata, read_image, read_image_file};
