//! Location of the proc filesystem.

use std::path::{Path, PathBuf};

/// Default procfs mount point.
pub const DEFAULT_PROCFS_PATH: &str = "/proc";

/// Resolves pseudo-file paths against a procfs mount point.
///
/// Production code uses `/proc`; tests point this at a fixture tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Mount point this instance reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file below the mount point, e.g. `path("sys/fs/file-nr")`.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(DEFAULT_PROCFS_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root() {
        let procfs = ProcFs::default();
        assert_eq!(procfs.root(), Path::new("/proc"));
        assert_eq!(procfs.path("interrupts"), PathBuf::from("/proc/interrupts"));
    }

    #[test]
    fn test_custom_root() {
        let procfs = ProcFs::new("tests/fixtures/proc");
        assert_eq!(
            procfs.path("sys/fs/file-nr"),
            PathBuf::from("tests/fixtures/proc/sys/fs/file-nr")
        );
    }
}
