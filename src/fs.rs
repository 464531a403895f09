use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::Path;

/// Filesystem operations the plugin relies on.
pub trait FileSystem: Send + Sync + Debug {
    /// Status check without following symlinks. Fails if `path` does not exist.
    fn is_dir(&self, path: &Path) -> io::Result<bool>;

    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(fs::symlink_metadata(path)?.is_dir())
    }

    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}
