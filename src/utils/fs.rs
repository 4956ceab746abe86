use std::fs;
use std::io;
use std::path::Path;

/// Outcome of [`write_if_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// Destination already held byte-identical content
    Unchanged,
}

/// File name for display, falling back to the full path when there is none.
pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// File stem (base name without extension), used for tile and folder names.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Writes `bytes` to `path` unless the file already exists with the same digest.
pub fn write_if_changed(path: &Path, bytes: &[u8]) -> io::Result<WriteOutcome> {
    if let Ok(existing) = fs::read(path) {
        if blake3::hash(&existing) == blake3::hash(bytes) {
            return Ok(WriteOutcome::Unchanged);
        }
    }
    fs::write(path, bytes)?;
    Ok(WriteOutcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn identical_content_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tile.bin");

        assert_eq!(write_if_changed(&path, b"abc").unwrap(), WriteOutcome::Written);
        assert_eq!(write_if_changed(&path, b"abc").unwrap(), WriteOutcome::Unchanged);
        assert_eq!(write_if_changed(&path, b"abd").unwrap(), WriteOutcome::Written);
        assert_eq!(fs::read(&path).unwrap(), b"abd");
    }

    #[test]
    fn names_are_derived_from_the_path() {
        let path = Path::new("/photos/holiday.shot.PNG");
        assert_eq!(base_name(path), "holiday.shot");
        assert_eq!(extract_filename(path), "holiday.shot.PNG");
    }
}
