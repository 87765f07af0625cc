//! mikedoc: API reference generator
//!
//! This crate builds a cross-linked Markdown API reference for a package:
//! - Reading a reflection dump (the symbol table) through the [`Reflection`] adapter
//! - Decoding sectioned docstrings (`[param]`, `[return]`, `[yield]`, `[except]`)
//! - Building an ordered model of modules, members and class lineages
//! - Rendering Markdown pages and replacing the API directory
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐
//! │ symbol table    │    │ package sources  │
//! │ (mikedoc.json)  │    │ (discovery)      │
//! └────────┬────────┘    └────────┬─────────┘
//!          │                      │
//!          └──────────┬───────────┘
//!                     ▼
//!              ┌──────────────┐
//!              │   Browser    │
//!              └──────┬───────┘
//!                     │
//!          ┌──────────┴──────────┐
//!          ▼                     ▼
//!    ┌──────────┐         ┌──────────┐
//!    │ Markdown │         │ Terminal │
//!    └──────────┘         └──────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use mikedoc::DocBuilder;
//!
//! DocBuilder::from_project_root(".")
//!     .and_then(|builder| builder.build())
//!     .expect("Failed to build the API reference");
//! ```

// Core model
pub mod class;
pub mod member;
pub mod module;

// Markup
pub mod docstring;
pub mod hyphen_list;

// Reflection and model building
pub mod browser;
pub mod classify;
pub mod feed;
pub mod mount;
pub mod reflection;

// Configuration, errors and utilities
pub mod config;
pub mod diagnostics;
pub mod printer;
pub mod utils;

// Output
pub mod builder;
pub mod markdown;
pub mod site;

// Re-exports for convenience
pub use browser::Browser;
pub use class::{ClassDescriptor, ClassMemberDescriptor, ClassMemberKind, PropertyAccessors};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, DiagnosticsCollector, DocError, DocResult};
pub use docstring::{parse_docstring, ParsedDocstring, SectionKey};
pub use feed::{
    AttributeKind, AttributeRecord, Binding, ClassAttribute, EnumConstant, ModuleRecord,
    RecordField, SymbolKind, SymbolTable, TypeForm, TypeRecord,
};
pub use hyphen_list::HyphenatedList;
pub use member::{MemberDescriptor, MemberKind};
pub use module::ModuleDescriptor;
pub use mount::{MountGuard, SearchPaths};
pub use reflection::{BaseRef, Reflection, TableReflection};

// Terminal output
pub use printer::DocPrinter;

// Builder API
pub use builder::{BuildOutput, DocBuilder};
pub use config::{MikeConfig, CONFIG_FILENAME};

// Output generators
pub use markdown::{MarkdownRenderer, RenderedPage, SiteContext};
pub use site::ApiSite;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
