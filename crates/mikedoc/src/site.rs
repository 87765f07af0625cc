//! API directory writer
//!
//! The API directory is only ever removed when it looks generated: it holds
//! exactly the `MIKEDOC` marker, the home page and the `modules` directory.
//! Anything else found there is left alone.

use crate::diagnostics::{DocError, DocResult};
use crate::markdown::RenderedPage;
use crate::utils::paths::{build_absolute_path, split_relative_path};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the marker file identifying a generated API directory
pub const MARKER_FILENAME: &str = "MIKEDOC";

/// Content of the marker file
pub const MARKER_TEXT: &str =
    "API Reference generated with [MikeDoc](https://github.com/pyrustic/mikedoc).\n";

/// Home page file name
pub const HOME_FILENAME: &str = "README.md";

/// Directory holding the module pages
pub const MODULES_DIRNAME: &str = "modules";

/// The API reference directory of a project
#[derive(Debug, Clone)]
pub struct ApiSite {
    path: PathBuf,
}

impl ApiSite {
    /// Locate the API directory `api_dir` of the project at `root`
    pub fn new(root: &Path, api_dir: &str) -> DocResult<Self> {
        if split_relative_path(api_dir).is_empty() {
            return Err(DocError::config("api_dir shouldn't be empty"));
        }
        Ok(Self {
            path: build_absolute_path(root, api_dir),
        })
    }

    /// Absolute path of the API directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the directory exists and holds exactly what a build produces
    pub fn is_generated(&self) -> DocResult<bool> {
        if !self.path.is_dir() {
            return Ok(false);
        }
        if fs::read_dir(&self.path)?.count() != 3 {
            return Ok(false);
        }
        Ok(self.path.join(MARKER_FILENAME).is_file()
            && self.path.join(HOME_FILENAME).is_file()
            && self.path.join(MODULES_DIRNAME).is_dir())
    }

    /// Remove the directory if it was generated; returns whether it was
    pub fn delete(&self) -> DocResult<bool> {
        if !self.is_generated()? {
            return Ok(false);
        }
        tracing::debug!("removing previous API reference at {}", self.path.display());
        fs::remove_dir_all(&self.path)?;
        Ok(true)
    }

    /// Replace the previous reference with an empty skeleton: the marker,
    /// an empty home page and the modules directory
    pub fn prepare(&self) -> DocResult<()> {
        if !self.delete()? && self.path.exists() {
            tracing::warn!(
                "{} was not generated by mikedoc, writing into it",
                self.path.display()
            );
        }

        fs::create_dir_all(self.path.join(MODULES_DIRNAME))?;
        fs::write(self.path.join(MARKER_FILENAME), MARKER_TEXT)?;
        fs::write(self.path.join(HOME_FILENAME), "")?;
        Ok(())
    }

    /// Save one page; blank pages are skipped
    pub fn save_page(&self, page: &RenderedPage) -> DocResult<Option<PathBuf>> {
        if page.is_blank() {
            return Ok(None);
        }

        let path = self.path.join(page.relative_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &page.text)?;
        Ok(Some(path))
    }

    /// Replace the API directory with `pages`, returning the written files
    pub fn write(&self, pages: &[RenderedPage]) -> DocResult<Vec<PathBuf>> {
        self.prepare()?;

        let mut written = Vec::with_capacity(pages.len());
        for page in pages {
            if let Some(path) = self.save_page(page)? {
                written.push(path);
            }
        }

        tracing::debug!("wrote {} pages to {}", written.len(), self.path.display());
        Ok(written)
    }
}
