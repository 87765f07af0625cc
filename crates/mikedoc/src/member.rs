//! Module member descriptors

use crate::class::ClassDescriptor;
use crate::docstring::{parse_docstring, ParsedDocstring};
use crate::feed::AttributeRecord;
use std::borrow::Cow;

/// Kind of a top-level member
#[derive(Debug, Clone)]
pub enum MemberKind<'r> {
    /// Constant, data value or pre-built instance
    Field,
    /// Function
    Callable,
    /// Class with its bases and resolved members
    Class(ClassDescriptor<'r>),
}

impl MemberKind<'_> {
    /// Display name of the kind
    pub fn display(&self) -> &'static str {
        match self {
            MemberKind::Field => "field",
            MemberKind::Callable => "function",
            MemberKind::Class(_) => "class",
        }
    }
}

/// One top-level symbol exported by a module
#[derive(Debug, Clone)]
pub struct MemberDescriptor<'r> {
    /// Member name, unique within its module
    pub name: String,
    /// Attribute as recorded by the adapter
    pub symbol: &'r AttributeRecord,
    /// Raw docstring
    pub doc: Option<&'r str>,
    /// Parsed docstring
    pub docstring: ParsedDocstring,
    /// Call signature, for callables and class constructors
    pub signature: Option<Cow<'r, str>>,
    /// Member kind
    pub kind: MemberKind<'r>,
}

impl<'r> MemberDescriptor<'r> {
    /// Create a member descriptor
    pub fn new(
        name: &str,
        symbol: &'r AttributeRecord,
        doc: Option<&'r str>,
        signature: Option<Cow<'r, str>>,
        kind: MemberKind<'r>,
    ) -> Self {
        Self {
            name: name.to_string(),
            symbol,
            doc,
            docstring: parse_docstring(doc),
            signature,
            kind,
        }
    }

    /// Check if this is a field
    pub fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field)
    }

    /// Check if this is a callable
    pub fn is_callable(&self) -> bool {
        matches!(self.kind, MemberKind::Callable)
    }

    /// Check if this is a class
    pub fn is_class(&self) -> bool {
        matches!(self.kind, MemberKind::Class(_))
    }

    /// Get the class part, for classes
    pub fn class(&self) -> Option<&ClassDescriptor<'r>> {
        match &self.kind {
            MemberKind::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Call signature, for callables and classes
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Printable value, for fields
    pub fn value(&self) -> Option<&'r str> {
        self.symbol.value.as_deref()
    }
}
