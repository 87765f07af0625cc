//! Module descriptors
//!
//! A [`ModuleDescriptor`] is created once per discovered module and holds its
//! exported members, already filtered, classified and sorted.

use crate::docstring::{parse_docstring, ParsedDocstring};
use crate::feed::ModuleRecord;
use crate::member::MemberDescriptor;

/// Documentation model of one module
#[derive(Debug, Clone)]
pub struct ModuleDescriptor<'r> {
    /// Dotted name, unique within a build
    pub name: String,
    /// Raw docstring
    pub doc: Option<&'r str>,
    /// Parsed docstring
    pub docstring: ParsedDocstring,
    /// Members in alphabetical order
    pub members: Vec<MemberDescriptor<'r>>,
    /// Module as recorded by the adapter
    pub record: &'r ModuleRecord,
}

impl<'r> ModuleDescriptor<'r> {
    /// Create a descriptor for `record`
    pub fn new(record: &'r ModuleRecord, members: Vec<MemberDescriptor<'r>>) -> Self {
        let doc = record.doc.as_deref();
        Self {
            name: record.name.clone(),
            doc,
            docstring: parse_docstring(doc),
            members,
            record,
        }
    }

    /// Check if the module exports nothing
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Field members, in member order
    pub fn fields(&self) -> Vec<&MemberDescriptor<'r>> {
        self.members.iter().filter(|m| m.is_field()).collect()
    }

    /// Callable members, in member order
    pub fn callables(&self) -> Vec<&MemberDescriptor<'r>> {
        self.members.iter().filter(|m| m.is_callable()).collect()
    }

    /// Class members, in member order
    pub fn classes(&self) -> Vec<&MemberDescriptor<'r>> {
        self.members.iter().filter(|m| m.is_class()).collect()
    }

    /// Find a member by name
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor<'r>> {
        self.members.iter().find(|m| m.name == name)
    }
}
