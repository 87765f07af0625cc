//! Class descriptors
//!
//! This module provides the documentation model of a class: its directly
//! declared bases, its special form, and the members visible on it once the
//! inheritance chain has been walked, each with its lineage.

use crate::docstring::{parse_docstring, ParsedDocstring};
use crate::feed::{
    AttributeKind, Binding, ClassAttribute, EnumConstant, RecordField, TypeForm, TypeRecord,
    CONSTRUCTOR_NAME,
};
use crate::reflection::BaseRef;

/// Accessors defined on a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PropertyAccessors {
    /// Has a getter
    pub getter: bool,
    /// Has a setter
    pub setter: bool,
    /// Has a deleter
    pub deleter: bool,
}

impl PropertyAccessors {
    /// Names of the defined accessors, in `getter, setter, deleter` order
    pub fn names(&self) -> Vec<&'static str> {
        [
            (self.getter, "getter"),
            (self.setter, "setter"),
            (self.deleter, "deleter"),
        ]
        .into_iter()
        .filter_map(|(present, name)| present.then_some(name))
        .collect()
    }
}

/// Kind of a class member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassMemberKind {
    /// Plain data
    Field,
    /// Accessor-style member
    Property(PropertyAccessors),
    /// Callable member with its binding
    Method(Binding),
}

impl ClassMemberKind {
    /// Classify a class attribute from its kind hint
    pub fn of(attribute: &ClassAttribute) -> Self {
        match attribute.kind {
            AttributeKind::Field => ClassMemberKind::Field,
            AttributeKind::Property => ClassMemberKind::Property(PropertyAccessors {
                getter: attribute.getter,
                setter: attribute.setter,
                deleter: attribute.deleter,
            }),
            AttributeKind::Method => ClassMemberKind::Method(attribute.binding),
        }
    }

    /// Display name of the kind
    pub fn display(&self) -> &'static str {
        match self {
            ClassMemberKind::Field => "field",
            ClassMemberKind::Property(_) => "property",
            ClassMemberKind::Method(_) => "method",
        }
    }
}

/// One attribute visible on a class after walking its inheritance chain
#[derive(Debug, Clone)]
pub struct ClassMemberDescriptor<'r> {
    /// Member name, unique within the class
    pub name: String,
    /// Declaration of the nearest type defining the member
    pub symbol: &'r ClassAttribute,
    /// Raw docstring
    pub doc: Option<&'r str>,
    /// Parsed docstring
    pub docstring: ParsedDocstring,
    /// Call signature, only for callable members
    pub signature: Option<&'r str>,
    /// Types declaring the member, nearest override first
    pub lineage: Vec<&'r TypeRecord>,
    /// Member kind
    pub kind: ClassMemberKind,
}

impl<'r> ClassMemberDescriptor<'r> {
    /// Describe `symbol` as found under `name` with the given lineage
    pub fn new(name: &str, symbol: &'r ClassAttribute, lineage: Vec<&'r TypeRecord>) -> Self {
        let kind = ClassMemberKind::of(symbol);
        let signature = match kind {
            ClassMemberKind::Method(_) => symbol.signature.as_deref(),
            _ => None,
        };
        let doc = symbol.doc.as_deref();

        Self {
            name: name.to_string(),
            symbol,
            doc,
            docstring: parse_docstring(doc),
            signature,
            lineage,
            kind,
        }
    }

    /// Whether this is the constructor
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    /// Check if this is a field
    pub fn is_field(&self) -> bool {
        matches!(self.kind, ClassMemberKind::Field)
    }

    /// Check if this is a property
    pub fn is_property(&self) -> bool {
        matches!(self.kind, ClassMemberKind::Property(_))
    }

    /// Check if this is a callable member
    pub fn is_method(&self) -> bool {
        matches!(self.kind, ClassMemberKind::Method(_))
    }

    /// Type that last defined or overrode the member
    pub fn defined_in(&self) -> Option<&'r TypeRecord> {
        self.lineage.first().copied()
    }

    /// Decorator line to show above the signature
    pub fn decorator(&self) -> Option<&'static str> {
        match self.kind {
            ClassMemberKind::Method(binding) => binding.decorator(),
            _ => None,
        }
    }
}

/// Class part of a member descriptor
#[derive(Debug, Clone, Default)]
pub struct ClassDescriptor<'r> {
    /// The class record, absent when the adapter has none
    pub record: Option<&'r TypeRecord>,
    /// Directly declared bases
    pub bases: Vec<BaseRef<'r>>,
    /// Members, constructor first, then fields, properties and methods
    pub members: Vec<ClassMemberDescriptor<'r>>,
}

impl<'r> ClassDescriptor<'r> {
    fn form(&self) -> Option<&'r TypeForm> {
        self.record.map(|record| &record.form)
    }

    /// Check if the class is an enumeration
    pub fn is_enumeration(&self) -> bool {
        matches!(self.form(), Some(TypeForm::Enumeration(_)))
    }

    /// Check if the class is a fixed record
    pub fn is_record(&self) -> bool {
        matches!(self.form(), Some(TypeForm::Record(_)))
    }

    /// Check if the class bypasses lineage resolution
    pub fn is_special_form(&self) -> bool {
        self.form().is_some_and(TypeForm::is_special)
    }

    /// Enumeration constants, empty for other classes
    pub fn constants(&self) -> &'r [EnumConstant] {
        match self.form() {
            Some(TypeForm::Enumeration(constants)) => constants,
            _ => &[],
        }
    }

    /// Record fields in declaration order, empty for other classes
    pub fn record_fields(&self) -> &'r [RecordField] {
        match self.form() {
            Some(TypeForm::Record(fields)) => fields,
            _ => &[],
        }
    }

    /// The constructor, if any
    pub fn constructor(&self) -> Option<&ClassMemberDescriptor<'r>> {
        self.members.iter().find(|m| m.is_constructor())
    }

    /// Field members
    pub fn fields(&self) -> impl Iterator<Item = &ClassMemberDescriptor<'r>> {
        self.members.iter().filter(|m| m.is_field())
    }

    /// Property members
    pub fn properties(&self) -> impl Iterator<Item = &ClassMemberDescriptor<'r>> {
        self.members.iter().filter(|m| m.is_property())
    }

    /// Callable members, constructor included
    pub fn methods(&self) -> impl Iterator<Item = &ClassMemberDescriptor<'r>> {
        self.members.iter().filter(|m| m.is_method())
    }
}
