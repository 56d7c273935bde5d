//! Staged replacement of an image file with its patched bytes.
//!
//! The patched output is written to a sibling temporary file first, then
//! renamed directly over the original. `rename` within one directory is
//! atomic on the platforms that matter here, so a crash mid-swap leaves
//! either the old file or the new one, never neither.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReplaceError;

/// Suffix appended to the original path for the staging file.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Write `bytes` next to `path` and swap the result into place.
///
/// A pre-existing file at the temporary path is a hard error — it is never
/// overwritten. On any failure the temporary file is removed and the
/// original is left untouched.
pub fn replace_file(path: &Path, bytes: &[u8]) -> Result<(), ReplaceError> {
    let temp = temp_path(path);
    if temp.exists() {
        return Err(ReplaceError::TempCollision(temp));
    }

    if let Err(source) = fs::write(&temp, bytes) {
        let _ = fs::remove_file(&temp);
        return Err(ReplaceError::Write { path: temp, source });
    }

    if let Err(source) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(ReplaceError::Rename {
            from: temp,
            to: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_os_string();
    staged.push(TEMP_SUFFIX);
    PathBuf::from(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn replaces_contents_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.jpg");
        fs::write(&path, b"old bytes").unwrap();

        replace_file(&path, b"new bytes").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new bytes");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn temp_suffix_extends_the_full_file_name() {
        assert_eq!(
            temp_path(Path::new("/photos/img.jpg")),
            PathBuf::from("/photos/img.jpg.tmp")
        );
    }

    #[test]
    fn existing_temp_file_is_a_hard_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.jpg");
        fs::write(&path, b"old bytes").unwrap();
        fs::write(temp_path(&path), b"leftover").unwrap();

        let result = replace_file(&path, b"new bytes");

        assert!(matches!(result, Err(ReplaceError::TempCollision(_))));
        // Neither the original nor the stray temp file was touched.
        assert_eq!(fs::read(&path).unwrap(), b"old bytes");
        assert_eq!(fs::read(temp_path(&path)).unwrap(), b"leftover");
    }

    #[test]
    fn unwritable_directory_leaves_original_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("photo.jpg");

        let result = replace_file(&path, b"new bytes");

        assert!(matches!(result, Err(ReplaceError::Write { .. })));
        assert!(!path.exists());
    }
}
