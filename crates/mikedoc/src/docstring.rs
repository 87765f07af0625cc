//! Docstring parsing and representation
//!
//! A docstring is made of an untagged description followed by optional
//! sections introduced by bracketed headers:
//!
//! ```text
//! Compute the answer.
//!
//! [param]
//! - arg: Argument
//! - code: Integer
//!
//! [return]
//! An integer
//!
//! [except]
//! - ValueError: when `code` is negative
//! ```
//!
//! Headers are case-insensitive and accept synonyms (`args`, `returns`,
//! `raises`, ...). Unknown headers are skipped along with their content.

use crate::hyphen_list::HyphenatedList;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Regex for a section header line: `[name]`
    static ref HEADER_REGEX: Regex = Regex::new(r"^\[\s*([^\[\]]*?)\s*\]\s*$").unwrap();
}

/// Section keys a docstring can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    /// Untagged leading block
    Description,
    /// `[param]` and synonyms
    Parameters,
    /// `[return]` and synonyms
    Returns,
    /// `[yield]` and synonyms
    Yields,
    /// `[except]` and synonyms
    Exceptions,
}

impl SectionKey {
    /// All keys in rendering order
    pub const ALL: [SectionKey; 5] = [
        SectionKey::Description,
        SectionKey::Parameters,
        SectionKey::Returns,
        SectionKey::Yields,
        SectionKey::Exceptions,
    ];

    /// Resolve a header name (already stripped of its brackets)
    pub fn from_header(header: &str) -> Option<Self> {
        match header.to_lowercase().as_str() {
            "" => Some(SectionKey::Description),
            "arg" | "args" | "argument" | "arguments" | "param" | "params" | "parameter"
            | "parameters" => Some(SectionKey::Parameters),
            "ret" | "return" | "returns" => Some(SectionKey::Returns),
            "yield" | "yields" => Some(SectionKey::Yields),
            "exc" | "except" | "exception" | "exceptions" | "raise" | "raises" => {
                Some(SectionKey::Exceptions)
            }
            _ => None,
        }
    }
}

/// Parsed docstring
///
/// Every present section holds non-empty, trimmed content; empty sections
/// are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocstring {
    /// Description text, line breaks preserved
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    /// Parameter name → description
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parameters: Option<HyphenatedList>,

    /// Value to return
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub returns: Option<String>,

    /// Value to yield
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub yields: Option<String>,

    /// Exception name → circumstance
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exceptions: Option<HyphenatedList>,
}

impl ParsedDocstring {
    /// Parse a docstring; a missing or blank docstring parses to an empty value
    pub fn parse(docstring: Option<&str>) -> Self {
        let text = match docstring {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Self::default(),
        };

        let blocks = split_sections(text);
        let mut doc = Self::default();

        for (key, lines) in blocks {
            match key {
                SectionKey::Description => {
                    doc.description = non_empty(lines.join("\n").trim());
                }
                SectionKey::Returns => doc.returns = flatten(&lines),
                SectionKey::Yields => doc.yields = flatten(&lines),
                SectionKey::Parameters => doc.parameters = parse_list(&lines),
                SectionKey::Exceptions => doc.exceptions = parse_list(&lines),
            }
        }

        doc
    }

    /// Check if no section is present
    pub fn is_empty(&self) -> bool {
        self.keys().next().is_none()
    }

    /// Keys of the present sections, in rendering order
    pub fn keys(&self) -> impl Iterator<Item = SectionKey> + '_ {
        SectionKey::ALL.into_iter().filter(|key| self.has(*key))
    }

    /// Whether a section is present
    pub fn has(&self, key: SectionKey) -> bool {
        match key {
            SectionKey::Description => self.description.is_some(),
            SectionKey::Parameters => self.parameters.is_some(),
            SectionKey::Returns => self.returns.is_some(),
            SectionKey::Yields => self.yields.is_some(),
            SectionKey::Exceptions => self.exceptions.is_some(),
        }
    }

    /// Get the description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the description or a placeholder
    pub fn description_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.description().unwrap_or(placeholder)
    }

    /// Get the value to return
    pub fn returns(&self) -> Option<&str> {
        self.returns.as_deref()
    }

    /// Get the value to yield
    pub fn yields(&self) -> Option<&str> {
        self.yields.as_deref()
    }

    /// Get the parameters list
    pub fn parameters(&self) -> Option<&HyphenatedList> {
        self.parameters.as_ref()
    }

    /// Get the exceptions list
    pub fn exceptions(&self) -> Option<&HyphenatedList> {
        self.exceptions.as_ref()
    }

    /// Description of a single parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.parameters.as_ref().and_then(|p| p.get(name))
    }
}

/// Parse a docstring
///
/// Pure function; calling it twice on the same input yields equal results.
pub fn parse_docstring(docstring: Option<&str>) -> ParsedDocstring {
    ParsedDocstring::parse(docstring)
}

/// Split raw text into known sections, in first-seen order.
///
/// Lines under an unknown header are dropped. A section opened again, under
/// the same header or a synonym, replaces the earlier one; only the
/// description resumes where it left off after an empty `[]` header.
fn split_sections(text: &str) -> Vec<(SectionKey, Vec<&str>)> {
    let mut blocks: Vec<(SectionKey, Vec<&str>)> = vec![(SectionKey::Description, Vec::new())];
    let mut current = Some(SectionKey::Description);

    for line in text.lines() {
        if let Some(caps) = HEADER_REGEX.captures(line) {
            current = SectionKey::from_header(&caps[1]);
            if let Some(key) = current {
                match blocks.iter().position(|(k, _)| *k == key) {
                    Some(index) if key != SectionKey::Description => blocks[index].1.clear(),
                    Some(_) => {}
                    None => blocks.push((key, Vec::new())),
                }
            }
            continue;
        }

        let Some(key) = current else {
            continue;
        };
        if let Some((_, lines)) = blocks.iter_mut().find(|(k, _)| *k == key) {
            lines.push(line);
        }
    }

    blocks
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Join trimmed non-blank lines with single spaces
fn flatten(lines: &[&str]) -> Option<String> {
    let joined = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    non_empty(&joined)
}

fn parse_list(lines: &[&str]) -> Option<HyphenatedList> {
    let list = HyphenatedList::parse(lines.join("\n").trim());
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}
