//! Common test utilities for integration tests.
//!
//! [`TestTree`] owns a scratch primary root and public root and a
//! [`FileService`] bound to them.

use std::fs;
use std::path::{Path, PathBuf};

use fsgate::{FileService, Roots};
use tempfile::TempDir;

/// A primary root and a public root in separate temporary directories.
pub struct TestTree {
    root: TempDir,
    _public: TempDir,
    /// Service with sharing enabled.
    pub service: FileService,
}

#[allow(dead_code)]
impl TestTree {
    /// Creates empty roots and a service over them.
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let public = tempfile::tempdir().unwrap();
        let roots = Roots::new(root.path())
            .unwrap()
            .with_public_root(public.path())
            .unwrap();
        Self {
            root,
            _public: public,
            service: FileService::new(roots),
        }
    }

    /// A service over the same primary root with sharing disabled.
    pub fn private_service(&self) -> FileService {
        FileService::new(Roots::new(self.root.path()).unwrap())
    }

    /// Canonical primary root.
    pub fn root(&self) -> &Path {
        self.service.roots().root()
    }

    /// Canonical public root.
    pub fn public(&self) -> &Path {
        self.service.roots().public_root().unwrap()
    }

    /// Absolute path of `rel` under the primary root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Absolute path of `rel` under the public root.
    pub fn public_path(&self, rel: &str) -> PathBuf {
        self.public().join(rel)
    }

    /// Writes a file under the primary root, creating parents.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Reads a file under the primary root.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    /// Creates a directory chain under the primary root.
    pub fn mkdir(&self, rel: &str) {
        fs::create_dir_all(self.path(rel)).unwrap();
    }

    /// Whether `rel` exists under the primary root, without following links.
    pub fn exists(&self, rel: &str) -> bool {
        fs::symlink_metadata(self.path(rel)).is_ok()
    }

    /// Whether `rel` exists under the public root, without following links.
    pub fn public_exists(&self, rel: &str) -> bool {
        fs::symlink_metadata(self.public_path(rel)).is_ok()
    }
}

/// Creates a symlink at `link` pointing to `target`.
#[cfg(unix)]
#[allow(dead_code)]
pub fn symlink(target: &Path, link: &Path) {
    std::os::unix::fs::symlink(target, link).unwrap();
}
