//! Hyphenated list parsing
//!
//! The parameters and exceptions sections of a docstring are written as
//! hyphenated lists:
//!
//! ```text
//! Introducing parameters
//! - arg: Argument
//! - code: Integer, spanning
//!     two lines
//! ```
//!
//! A line starting with `-` opens an entry, `key: content` when the line has a
//! colon and untagged intro text otherwise. Every other line continues the
//! current entry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key of the untagged introductory entry
pub const INTRO_KEY: &str = "";

/// Ordered key → description mapping decoded from a hyphenated list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HyphenatedList {
    entries: IndexMap<String, String>,
}

impl HyphenatedList {
    /// Parse the raw text of a hyphenated list section
    pub fn parse(text: &str) -> Self {
        let mut pieces: IndexMap<String, Vec<String>> = IndexMap::new();
        pieces.insert(INTRO_KEY.to_string(), Vec::new());
        let mut key = INTRO_KEY.to_string();

        for line in text.lines() {
            if let Some(rest) = line.strip_prefix('-') {
                let value = match rest.split_once(':') {
                    Some((name, value)) => {
                        key = name.trim().to_string();
                        value
                    }
                    None => {
                        key = INTRO_KEY.to_string();
                        rest
                    }
                };
                pieces
                    .entry(key.clone())
                    .or_default()
                    .push(value.trim().to_string());
            } else {
                pieces
                    .entry(key.clone())
                    .or_default()
                    .push(line.trim().to_string());
            }
        }

        Self::merge(pieces)
    }

    /// Merge the accumulated lines of each entry, dropping empty entries
    fn merge(pieces: IndexMap<String, Vec<String>>) -> Self {
        let entries = pieces
            .into_iter()
            .filter_map(|(key, lines)| {
                let separator = if key == INTRO_KEY { "\n" } else { " " };
                let merged = lines.join(separator).trim().to_string();
                (!merged.is_empty()).then_some((key, merged))
            })
            .collect();
        Self { entries }
    }

    /// Description attached to `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The untagged introduction, if any
    pub fn intro(&self) -> Option<&str> {
        self.get(INTRO_KEY)
    }

    /// Keyed entries in order, without the introduction
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(key, _)| *key != INTRO_KEY)
    }

    /// All entries in order, introduction included
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries, introduction included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry survived merging
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a HyphenatedList {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
