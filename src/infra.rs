//! Infrastructure traits for abstracting I/O operations.
//!
//! Options files are read through [`FileSystem`] so loading can be tested
//! without touching the disk.

use std::io;
use std::path::Path;

/// Trait for abstracting filesystem reads.
pub trait FileSystem {
    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_real_filesystem_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("html.json");
        std::fs::write(&path, "{}").unwrap();

        assert_eq!(RealFileSystem.read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_real_filesystem_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = RealFileSystem
            .read_to_string(&dir.path().join("missing.json"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
