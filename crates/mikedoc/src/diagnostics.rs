//! Error types and diagnostics
//!
//! This module provides error handling and diagnostic reporting
//! for the API reference builder.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mikedoc operations
pub type DocResult<T> = Result<T, DocError>;

/// Main error type for mikedoc
#[derive(Debug, Error)]
pub enum DocError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (empty or unresolvable package path, bad config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A discovered source unit could not be loaded
    #[error("Failed to load module {module} ({file}): {message}")]
    ModuleLoad {
        module: String,
        file: PathBuf,
        message: String,
    },

    /// Symbol table (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file format error
    #[error("Config format error: {0}")]
    ConfigFormat(#[from] toml::de::Error),

    /// Template registration or rendering error
    #[error("Template error: {0}")]
    Template(String),

    /// Directory traversal error
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl DocError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        DocError::Config(message.into())
    }

    /// Create a module load error
    pub fn module_load(
        module: impl Into<String>,
        file: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        DocError::ModuleLoad {
            module: module.into(),
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        DocError::Other(message.into())
    }

    /// Whether the error was raised before any module got processed
    pub fn is_config(&self) -> bool {
        matches!(self, DocError::Config(_) | DocError::ConfigFormat(_))
    }
}

impl From<handlebars::TemplateError> for DocError {
    fn from(err: handlebars::TemplateError) -> Self {
        DocError::Template(err.to_string())
    }
}

impl From<handlebars::RenderError> for DocError {
    fn from(err: handlebars::RenderError) -> Self {
        DocError::Template(err.to_string())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Warning - the build continues
    Warning,
    /// Info - informational message
    Info,
}

impl DiagnosticSeverity {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
        }
    }
}

/// A non-fatal finding collected while building the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Message
    pub message: String,
    /// Dotted name of the module the finding belongs to
    pub module: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            module: None,
        }
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, message)
    }

    /// Create an info diagnostic
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Info, message)
    }

    /// Attach the module
    pub fn in_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn is_warning(&self) -> bool {
        self.severity == DiagnosticSeverity::Warning
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        match &self.module {
            Some(module) => format!("{}: {}: {}", module, self.severity.display(), self.message),
            None => format!("{}: {}", self.severity.display(), self.message),
        }
    }
}

/// Collector for diagnostics during a build
#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add a warning
    pub fn warning(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::warning(message));
    }

    /// Add an info message
    pub fn info(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::info(message));
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get warning count
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .count()
    }

    /// Take the collected diagnostics, leaving the collector empty
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
