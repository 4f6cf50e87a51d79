//! File system abstraction
//!
//! The host platform owns the real file system (and may layer caches or
//! in-memory overlays on top of it). Everything in this crate that touches
//! disk goes through the [`FileSystem`] trait so tests can substitute
//! controlled implementations.

use std::io;
use std::time::SystemTime;

use camino::Utf8Path;

/// Trait for the file system operations this crate needs from the host.
pub trait FileSystem: Send + Sync {
    /// Read the entire contents of a file.
    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Utf8Path) -> bool;

    /// Check if a path is a directory.
    fn is_directory(&self, path: &Utf8Path) -> bool;

    /// Modification stamp of the file at `path`.
    ///
    /// `None` means the file does not exist or its metadata is
    /// unavailable; callers treat both the same way.
    fn modified(&self, path: &Utf8Path) -> Option<SystemTime>;
}

/// Standard file system implementation that uses `std::fs`.
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String> {
        std::fs::read_to_string(path.as_std_path())
    }

    fn exists(&self, path: &Utf8Path) -> bool {
        path.as_std_path().exists()
    }

    fn is_directory(&self, path: &Utf8Path) -> bool {
        path.as_std_path().is_dir()
    }

    fn modified(&self, path: &Utf8Path) -> Option<SystemTime> {
        std::fs::metadata(path.as_std_path())
            .and_then(|meta| meta.modified())
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn utf8_tmpdir() -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        (tmp, root)
    }

    #[test]
    fn reads_file_contents() {
        let (_tmp, root) = utf8_tmpdir();
        let file = root.join("go.work");
        std::fs::write(file.as_std_path(), "use ./app\n").unwrap();

        assert_eq!(OsFileSystem.read_to_string(&file).unwrap(), "use ./app\n");
    }

    #[test]
    fn distinguishes_files_from_directories() {
        let (_tmp, root) = utf8_tmpdir();
        let dir = root.join("app");
        std::fs::create_dir(dir.as_std_path()).unwrap();
        let file = root.join("go.work");
        std::fs::write(file.as_std_path(), "").unwrap();

        assert!(OsFileSystem.is_directory(&dir));
        assert!(!OsFileSystem.is_directory(&file));
        assert!(OsFileSystem.exists(&file));
        assert!(!OsFileSystem.exists(&root.join("missing")));
    }

    #[test]
    fn modified_is_none_for_missing_file() {
        let (_tmp, root) = utf8_tmpdir();
        assert!(OsFileSystem.modified(&root.join("missing")).is_none());
    }

    #[test]
    fn modified_is_some_for_existing_file() {
        let (_tmp, root) = utf8_tmpdir();
        let file = root.join("go.work");
        std::fs::write(file.as_std_path(), "").unwrap();
        assert!(OsFileSystem.modified(&file).is_some());
    }
}
