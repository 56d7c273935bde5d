use chrono::NaiveDateTime;
use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use little_exif::exif_tag::ExifTag;
use little_exif::filetype::FileExtension;
use little_exif::metadata::Metadata;

use super::ImageMetadata;
use crate::date::{format_exif_datetime, parse_exif_datetime};
use crate::error::{PatchError, ShiftError};

// little_exif as_u8_vec(JPEG) returns: [APP1 marker 2B][length 2B][Exif\0\0 6B][TIFF data]
// img-parts set_exif() expects just the TIFF data (after Exif\0\0)
const JPEG_EXIF_OVERHEAD: usize = 10; // 2 + 2 + 6

/// Extract the capture date (DateTimeOriginal, 0x9003) from the handle.
///
/// Absence of the tag is [`ShiftError::MissingCaptureDate`]; a present tag
/// whose value does not match the EXIF date pattern is a date error.
pub fn capture_date(handle: &ImageMetadata) -> Result<NaiveDateTime, ShiftError> {
    for tag in &handle.exif {
        if let ExifTag::DateTimeOriginal(raw) = tag {
            return parse_exif_datetime(raw).map_err(ShiftError::from);
        }
    }
    Err(ShiftError::MissingCaptureDate)
}

/// Replace the capture date and re-splice the EXIF segment into the JPEG.
///
/// Consumes the handle and returns the full patched byte stream. Every
/// non-EXIF segment and all scan data pass through verbatim; only the APP1
/// EXIF segment is re-encoded, with its position in the segment order kept
/// (EXIF must stay ahead of any XMP APP1 for most parsers).
pub fn rewrite_capture_date(
    mut handle: ImageMetadata,
    instant: &NaiveDateTime,
) -> Result<Bytes, PatchError> {
    let stamp = format_exif_datetime(instant);
    // set_tag drops any existing entry for the tag id before inserting
    handle.exif.set_tag(ExifTag::DateTimeOriginal(stamp));

    let tiff_data = serialize_exif(&handle.exif)?;
    let orig_pos = exif_segment_pos(&handle.jpeg).ok_or(PatchError::NoExif)?;

    let mut jpeg = handle.jpeg;
    jpeg.set_exif(Some(Bytes::from(tiff_data)));

    // set_exif() inserts at position 3, which can land after other APP1
    // segments. Move the segment back to where the original sat.
    if let Some(new_pos) = exif_segment_pos(&jpeg) {
        if new_pos != orig_pos && orig_pos < new_pos {
            let segments = jpeg.segments_mut();
            let segment = segments.remove(new_pos);
            segments.insert(orig_pos, segment);
        }
    }

    Ok(jpeg.encoder().bytes())
}

fn serialize_exif(exif: &Metadata) -> Result<Vec<u8>, PatchError> {
    let encoded = exif
        .as_u8_vec(FileExtension::JPEG)
        .map_err(|e| PatchError::Serialize(e.to_string()))?;
    if encoded.len() <= JPEG_EXIF_OVERHEAD {
        return Err(PatchError::Serialize(
            "EXIF directory encoded to an empty segment".to_string(),
        ));
    }
    Ok(encoded[JPEG_EXIF_OVERHEAD..].to_vec())
}

/// Find the EXIF APP1 segment (marker 0xE1, contents starting "Exif\0\0").
fn exif_segment_pos(jpeg: &Jpeg) -> Option<usize> {
    const EXIF_PREFIX: &[u8] = b"Exif\0\0";
    jpeg.segments()
        .iter()
        .position(|s| s.marker() == 0xE1 && s.contents().starts_with(EXIF_PREFIX))
}
