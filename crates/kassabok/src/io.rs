//! I/O utility functions

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write bytes through a staging file, then atomically swap it into place.
///
/// Every full overwrite in this application goes through here: the content
/// lands in a sibling staging file first and the rename makes it visible in
/// one step, so an interruption mid-write can never leave the target empty
/// or truncated; the previous content stays until the swap.
pub fn atomic_write_bytes(path: &Path, content: &[u8]) -> io::Result<()> {
    let staging = staging_path(path);
    fs::write(&staging, content)?;
    fs::rename(&staging, path)
}

/// Staging sibling of `path`. Kept in the same directory so the final
/// rename never crosses a filesystem boundary.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".staging");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_and_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");

        atomic_write_bytes(&path, b"first").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"first");

        atomic_write_bytes(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_no_staging_file_left_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");

        atomic_write_bytes(&path, b"content").unwrap();
        assert!(!staging_path(&path).exists());
    }
}
