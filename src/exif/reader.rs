use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use little_exif::filetype::FileExtension;
use little_exif::metadata::Metadata;
use std::path::Path;

use crate::error::MetadataError;

/// One JPEG image opened for metadata editing.
///
/// Owns the parsed segment container (every non-EXIF segment held verbatim
/// for the later re-splice) and the editable EXIF tag model. Created here,
/// consumed exactly once by [`rewrite_capture_date`](super::rewrite_capture_date).
pub struct ImageMetadata {
    pub(crate) jpeg: Jpeg,
    pub(crate) exif: Metadata,
}

/// Parse a JPEG byte source into an [`ImageMetadata`] handle.
///
/// `label` is used only for diagnostics. Distinguishes three failure shapes:
/// an unparsable container or tag structure is [`MetadataError::Corrupt`],
/// a well-formed JPEG without an EXIF segment (or with an empty one) is
/// [`MetadataError::NoMetadata`], and upstream read failures arrive as
/// [`MetadataError::Io`] via [`read_image_file`].
pub fn read_image(bytes: Vec<u8>, label: &str) -> Result<ImageMetadata, MetadataError> {
    let jpeg = Jpeg::from_bytes(Bytes::from(bytes.clone()))
        .map_err(|e| MetadataError::Corrupt(format!("{label}: {e}")))?;

    if jpeg.exif().is_none() {
        log::debug!("no EXIF segment in {label}");
        return Err(MetadataError::NoMetadata);
    }

    let exif =
        parse_tag_model(bytes).map_err(|detail| MetadataError::Corrupt(format!("{label}: {detail}")))?;

    if (&exif).into_iter().next().is_none() {
        log::debug!("EXIF segment in {label} holds no tags");
        return Err(MetadataError::NoMetadata);
    }

    Ok(ImageMetadata { jpeg, exif })
}

/// Read and parse a JPEG file from disk.
pub fn read_image_file(path: &Path) -> Result<ImageMetadata, MetadataError> {
    let bytes = std::fs::read(path)?;
    read_image(bytes, &path.display().to_string())
}

/// Parse the EXIF tag model, suppressing panics from little_exif on
/// malformed TIFF data.
fn parse_tag_model(bytes: Vec<u8>) -> Result<Metadata, String> {
    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {}));
    let result =
        std::panic::catch_unwind(move || Metadata::new_from_vec(&bytes, FileExtension::JPEG));
    std::panic::set_hook(prev_hook);

    match result {
        Ok(Ok(metadata)) => Ok(metadata),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("EXIF parser panicked".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{jpeg_with_capture_date, minimal_jpeg};
    use tempfile::TempDir;

    #[test]
    fn jpeg_without_exif_is_no_metadata() {
        let result = read_image(minimal_jpeg(), "plain.jpg");
        assert!(matches!(result, Err(MetadataError::NoMetadata)));
    }

    #[test]
    fn garbage_bytes_are_corrupt() {
        let result = read_image(b"definitely not a jpeg".to_vec(), "note.txt");
        assert!(matches!(result, Err(MetadataError::Corrupt(_))));
    }

    #[test]
    fn missing_file_is_io() {
        let result = read_image_file(Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(MetadataError::Io(_))));
    }

    #[test]
    fn jpeg_with_exif_yields_handle() {
        let dir = TempDir::new().unwrap();
        let path = jpeg_with_capture_date(dir.path(), "a.jpg", "2023:06:15 14:30:00");

        let handle = read_image_file(&path).unwrap();
        assert!((&handle.exif).into_iter().next().is_some());
    }
}
