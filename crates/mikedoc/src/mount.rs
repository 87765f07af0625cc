//! Scoped module search paths
//!
//! Modules only resolve while the project is mounted: the parent directory of
//! the package is registered on the adapter's search path for the duration of
//! discovery and removed again on every exit path.

use crate::diagnostics::DocResult;
use crate::utils::paths::mount_path;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Ordered module search path, most recently mounted first
#[derive(Debug, Default)]
pub struct SearchPaths {
    paths: RefCell<Vec<PathBuf>>,
}

impl SearchPaths {
    /// Create an empty search path
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` until the returned guard is dropped
    pub fn mount(&self, path: impl Into<PathBuf>) -> MountGuard<'_> {
        let path = path.into();
        tracing::debug!("mounting {}", path.display());
        self.paths.borrow_mut().insert(0, path.clone());
        MountGuard { paths: self, path }
    }

    /// Mount the project at `root` whose package lives in `pkg_dir`
    pub fn mount_project(&self, root: &Path, pkg_dir: &str) -> DocResult<MountGuard<'_>> {
        Ok(self.mount(mount_path(root, pkg_dir)?))
    }

    /// Run `f` with the project mounted; the mount is released whatever `f` returns
    pub fn with_project<T>(
        &self,
        root: &Path,
        pkg_dir: &str,
        f: impl FnOnce() -> DocResult<T>,
    ) -> DocResult<T> {
        let _guard = self.mount_project(root, pkg_dir)?;
        f()
    }

    /// Whether `path` is currently mounted
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.borrow().iter().any(|p| p == path)
    }

    /// Whether nothing is mounted
    pub fn is_empty(&self) -> bool {
        self.paths.borrow().is_empty()
    }

    /// Copy of the current search path
    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.paths.borrow().clone()
    }

    fn release(&self, path: &Path) {
        let mut paths = self.paths.borrow_mut();
        if let Some(pos) = paths.iter().position(|p| p == path) {
            paths.remove(pos);
        }
    }
}

/// Registration of one search path entry, released on drop
#[derive(Debug)]
pub struct MountGuard<'a> {
    paths: &'a SearchPaths,
    path: PathBuf,
}

impl MountGuard<'_> {
    /// The mounted directory
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for MountGuard<'_> {
    fn drop(&mut self) {
        tracing::debug!("unmounting {}", self.path.display());
        self.paths.release(&self.path);
    }
}
