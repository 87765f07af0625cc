//! Project configuration
//!
//! `mikedoc.toml` lives at the project root and holds everything a build
//! needs besides the symbol table itself.

use crate::builder::{DocBuilder, DEFAULT_SYMBOLS_FILE};
use crate::diagnostics::{DocError, DocResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name, at the project root
pub const CONFIG_FILENAME: &str = "mikedoc.toml";

const CONFIG_TEXT: &str = r#"# project name
project_name = "{project_name}"

# project's website or README
project_url = "/README.md"

# package directory (relative path)
pkg_dir = "{pkg_dir}"

# API directory (relative path)
api_dir = "docs/api"

# symbol table produced by the reflection dump (relative path)
symbols = "mikedoc.json"
"#;

fn default_symbols() -> String {
    DEFAULT_SYMBOLS_FILE.to_string()
}

/// Contents of `mikedoc.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MikeConfig {
    pub project_name: String,
    pub project_url: String,
    pub pkg_dir: String,
    pub api_dir: String,
    #[serde(default = "default_symbols")]
    pub symbols: String,
}

impl MikeConfig {
    /// Path of the config file of the project at `root`
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILENAME)
    }

    /// Parse and validate config text
    pub fn from_toml(text: &str) -> DocResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file of the project at `root`
    pub fn load(root: &Path) -> DocResult<Self> {
        let path = Self::path(root);
        if !path.is_file() {
            return Err(DocError::config(format!(
                "missing config file {}, run the `init` command in the root dir",
                path.display()
            )));
        }
        Self::from_toml(&fs::read_to_string(&path)?)
    }

    /// Every field must be non-empty
    pub fn validate(&self) -> DocResult<()> {
        let fields = [
            ("project_name", &self.project_name),
            ("project_url", &self.project_url),
            ("pkg_dir", &self.pkg_dir),
            ("api_dir", &self.api_dir),
            ("symbols", &self.symbols),
        ];
        for (key, value) in fields {
            if value.trim().is_empty() {
                return Err(DocError::config(format!("`{}` shouldn't be empty", key)));
            }
        }
        Ok(())
    }

    /// Turn the config into a builder for the project at `root`
    pub fn into_builder(self, root: &Path) -> DocBuilder {
        DocBuilder::new(root)
            .project_name(self.project_name)
            .project_url(self.project_url)
            .pkg_dir(self.pkg_dir)
            .api_dir(self.api_dir)
            .symbols(self.symbols)
    }
}

/// Default config text for the project at `root`.
///
/// The project name is the capitalized directory name; the package name is
/// the directory name with hyphens turned into underscores, found either at
/// the root or under `src/`.
pub fn create_config_text(root: &Path) -> DocResult<String> {
    let root = fs::canonicalize(root)?;
    let basename = root
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| DocError::config(format!("no usable directory name: {}", root.display())))?;

    let pkg_name = basename.replace('-', "_");
    let pkg_dir = if root.join(&pkg_name).is_dir() {
        pkg_name
    } else {
        format!("src/{}", pkg_name)
    };

    Ok(CONFIG_TEXT
        .replace("{project_name}", &capitalize(basename))
        .replace("{pkg_dir}", &pkg_dir))
}

/// Write the default config file; an existing file is never overwritten.
///
/// Returns whether the file was created.
pub fn init(root: &Path) -> DocResult<bool> {
    let path = MikeConfig::path(root);
    if path.exists() {
        tracing::debug!("{} already exists", path.display());
        return Ok(false);
    }
    fs::write(&path, create_config_text(root)?)?;
    Ok(true)
}

/// First character uppercased, the rest lowercased
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
