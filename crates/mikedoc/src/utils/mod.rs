//! Utilities for mikedoc
//!
//! This module provides utilities for:
//! - Project path handling and page urls
//! - Markdown text escaping and truncation

pub mod paths;
pub mod text;

pub use paths::{build_api_url, build_module_name, build_src_url, split_relative_path};
pub use text::{escape_emphasis, short_description, truncate, urlify_section_title};
