//! DocBuilder - Main API for API reference generation
//!
//! A build loads the symbol table, browses the package, renders every page
//! in memory and only then replaces the API directory. A fatal error at any
//! step leaves the previous reference untouched.

use crate::browser::Browser;
use crate::diagnostics::{Diagnostic, DocResult};
use crate::feed::SymbolTable;
use crate::markdown::{MarkdownRenderer, SiteContext};
use crate::module::ModuleDescriptor;
use crate::reflection::TableReflection;
use crate::site::ApiSite;
use std::path::{Path, PathBuf};

/// Default symbol table file name, relative to the project root
pub const DEFAULT_SYMBOLS_FILE: &str = "mikedoc.json";

/// Build output
#[derive(Debug)]
pub struct BuildOutput {
    /// Written pages
    pub files: Vec<PathBuf>,
    /// API directory
    pub api_dir: PathBuf,
    /// Number of modules with at least one member
    pub module_count: usize,
    /// Non-fatal findings collected while browsing
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildOutput {
    /// Number of warnings among the diagnostics
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }
}

/// Builder for configuring API reference generation
///
/// # Example
///
/// ```no_run
/// use mikedoc::DocBuilder;
///
/// let output = DocBuilder::new(".")
///     .project_name("MyProject")
///     .pkg_dir("src/my_project")
///     .api_dir("docs/api")
///     .build()
///     .expect("Failed to generate the API reference");
/// println!("{} pages", output.files.len());
/// ```
#[derive(Debug, Clone)]
pub struct DocBuilder {
    /// Project root
    pub root: PathBuf,
    /// Project name shown in page headers
    pub project_name: String,
    /// Link target of the "Project" header entry
    pub project_url: String,
    /// Package directory, relative to the root
    pub pkg_dir: String,
    /// API directory, relative to the root
    pub api_dir: String,
    /// Symbol table file; relative paths are resolved against the root
    pub symbols: PathBuf,
    table: Option<SymbolTable>,
}

impl DocBuilder {
    /// Create a builder for the project at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            project_name: String::new(),
            project_url: "/README.md".to_string(),
            pkg_dir: String::new(),
            api_dir: "docs/api".to_string(),
            symbols: PathBuf::from(DEFAULT_SYMBOLS_FILE),
            table: None,
        }
    }

    /// Set the project name
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    /// Set the project URL
    pub fn project_url(mut self, url: impl Into<String>) -> Self {
        self.project_url = url.into();
        self
    }

    /// Set the package directory
    pub fn pkg_dir(mut self, pkg_dir: impl Into<String>) -> Self {
        self.pkg_dir = pkg_dir.into();
        self
    }

    /// Set the API directory
    pub fn api_dir(mut self, api_dir: impl Into<String>) -> Self {
        self.api_dir = api_dir.into();
        self
    }

    /// Set the symbol table file
    pub fn symbols(mut self, path: impl Into<PathBuf>) -> Self {
        self.symbols = path.into();
        self
    }

    /// Use an in-memory symbol table instead of reading the file
    pub fn with_table(mut self, table: SymbolTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Absolute path of the symbol table file
    pub fn symbols_path(&self) -> PathBuf {
        if self.symbols.is_absolute() {
            self.symbols.clone()
        } else {
            self.root.join(&self.symbols)
        }
    }

    /// Create the reflection adapter over the configured symbol table
    pub fn reflection(&self) -> DocResult<TableReflection> {
        let table = match &self.table {
            Some(table) => table.clone(),
            None => {
                let path = self.symbols_path();
                tracing::debug!("loading symbol table {}", path.display());
                SymbolTable::from_file(&path)?
            }
        };
        Ok(TableReflection::new(table))
    }

    /// Site context passed to the renderer
    pub fn site_context(&self) -> SiteContext {
        SiteContext::new(
            self.project_name.clone(),
            self.project_url.clone(),
            self.pkg_dir.clone(),
            self.api_dir.clone(),
        )
    }

    /// Describe every module of the package without writing anything
    pub fn browse<'r>(
        &self,
        reflection: &'r TableReflection,
    ) -> DocResult<(Vec<ModuleDescriptor<'r>>, Vec<Diagnostic>)> {
        let mut browser = Browser::new(reflection, self.root.clone(), self.pkg_dir.clone());
        let modules = browser.list_modules()?;
        Ok((modules, browser.take_diagnostics()))
    }

    /// Build the API reference
    ///
    /// This method:
    /// 1. Loads the symbol table
    /// 2. Browses the package into the documentation model
    /// 3. Renders every page
    /// 4. Replaces the API directory with the rendered pages
    pub fn build(self) -> DocResult<BuildOutput> {
        let site = ApiSite::new(&self.root, &self.api_dir)?;
        let reflection = self.reflection()?;
        let (modules, diagnostics) = self.browse(&reflection)?;

        let renderer = MarkdownRenderer::new(self.site_context())?;
        let pages = renderer.render_site(&modules)?;
        let files = site.write(&pages)?;
        let module_count = modules.iter().filter(|m| !m.is_empty()).count();

        tracing::info!(
            "generated {} pages for {} modules in {}",
            files.len(),
            module_count,
            site.path().display()
        );

        Ok(BuildOutput {
            files,
            api_dir: site.path().to_path_buf(),
            module_count,
            diagnostics,
        })
    }

    /// Create a builder for the project at `root` from its config file
    pub fn from_project_root(root: impl AsRef<Path>) -> DocResult<Self> {
        let root = root.as_ref();
        Ok(crate::config::MikeConfig::load(root)?.into_builder(root))
    }
}
