//! Builder API for mikedoc
//!
//! This module provides the programmatic entry point for generating an API
//! reference: configure a [`DocBuilder`], then call [`DocBuilder::build`].

mod doc_builder;

pub use doc_builder::{BuildOutput, DocBuilder, DEFAULT_SYMBOLS_FILE};
