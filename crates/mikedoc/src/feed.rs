//! Symbol table records
//!
//! The symbol table is the reflection dump the core works from: every module
//! of the documented package with its attribute table, and every class keyed
//! by its dotted identity with its resolution order and directly declared
//! attributes. Any introspection front end able to emit this JSON shape can
//! feed the builder.

use crate::diagnostics::{DocError, DocResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dotted identity of the universal root type, skipped by lineage resolution
pub const ROOT_TYPE: &str = "builtins.object";

/// Name of the constructor member, always surfaced on classes
pub const CONSTRUCTOR_NAME: &str = "__init__";

/// Whether a name uses the reserved double-underscore convention
pub fn is_reserved_name(name: &str) -> bool {
    name.starts_with("__")
}

/// Whether a name is protected/private (leading underscore)
pub fn is_private_name(name: &str) -> bool {
    name.starts_with('_')
}

/// Complete reflection dump for one package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolTable {
    /// Modules, in any order
    #[serde(default)]
    pub modules: Vec<ModuleRecord>,

    /// Classes keyed by dotted identity (`module.QualName`)
    #[serde(default)]
    pub types: IndexMap<String, TypeRecord>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from JSON text
    pub fn from_json(text: &str) -> DocResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a table from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> DocResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DocError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serialize the table as pretty JSON
    pub fn to_json(&self) -> DocResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find a module by dotted name
    pub fn module(&self, name: &str) -> Option<&ModuleRecord> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Find a class by dotted identity
    pub fn type_record(&self, id: &str) -> Option<&TypeRecord> {
        self.types.get(id)
    }

    /// Add a module
    pub fn with_module(mut self, module: ModuleRecord) -> Self {
        self.modules.push(module);
        self
    }

    /// Add a class, keyed by its dotted identity
    pub fn with_type(mut self, ty: TypeRecord) -> Self {
        self.types.insert(ty.id(), ty);
        self
    }
}

/// One module-like unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    /// Dotted name (`pkg.sub.module`, `pkg.__init__`)
    pub name: String,

    /// Module docstring
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doc: Option<String>,

    /// Explicit export allow-list
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exports: Option<Vec<String>>,

    /// Every named attribute attached to the module
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeRecord>,
}

impl ModuleRecord {
    /// Create a module record
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the docstring
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the export allow-list
    pub fn with_exports<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exports = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, attr: AttributeRecord) -> Self {
        self.attributes.insert(name.into(), attr);
        self
    }
}

/// Kind hint for a module attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymbolKind {
    /// Composite type definition
    Class,
    /// Invocable function
    Function,
    /// Constants, data values, pre-built instances
    #[default]
    Data,
}

/// One attribute attached to a module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRecord {
    /// Kind hint
    #[serde(default)]
    pub kind: SymbolKind,

    /// Dotted name of the module that defines the attribute
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub owner: Option<String>,

    /// Docstring
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doc: Option<String>,

    /// Call signature, `(a, b=1)`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub signature: Option<String>,

    /// Class identity in [`SymbolTable::types`], for class attributes
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub type_ref: Option<String>,

    /// Printable representation of the value
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<String>,
}

impl AttributeRecord {
    /// A data attribute
    pub fn data(owner: &str, value: impl Into<String>) -> Self {
        Self {
            kind: SymbolKind::Data,
            owner: Some(owner.to_string()),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// A function attribute
    pub fn function(owner: &str, signature: impl Into<String>) -> Self {
        Self {
            kind: SymbolKind::Function,
            owner: Some(owner.to_string()),
            signature: Some(signature.into()),
            ..Default::default()
        }
    }

    /// A class attribute pointing at a type record
    pub fn class(owner: &str, type_ref: impl Into<String>) -> Self {
        Self {
            kind: SymbolKind::Class,
            owner: Some(owner.to_string()),
            type_ref: Some(type_ref.into()),
            ..Default::default()
        }
    }

    /// Set the docstring
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the signature
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }
}

/// One class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRecord {
    /// Qualified name inside its module
    pub name: String,

    /// Dotted name of the defining module (`builtins` for built-in types)
    pub module: String,

    /// Class docstring
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doc: Option<String>,

    /// Directly declared bases, as dotted identities
    #[serde(default)]
    pub bases: Vec<String>,

    /// Resolution order, most-derived first, as dotted identities
    #[serde(default)]
    pub mro: Vec<String>,

    /// Attributes declared directly on this class
    #[serde(default)]
    pub attributes: IndexMap<String, ClassAttribute>,

    /// Special-form shape
    #[serde(default)]
    pub form: TypeForm,
}

impl TypeRecord {
    /// Create a class record whose resolution order is itself then the root
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        let mut ty = Self {
            name: name.into(),
            module: module.into(),
            ..Default::default()
        };
        ty.mro = vec![ty.id(), ROOT_TYPE.to_string()];
        ty
    }

    /// Dotted identity (`module.QualName`, or the bare name for built-ins)
    pub fn id(&self) -> String {
        if self.module.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.module, self.name)
        }
    }

    /// Name to display, built-in types shown without their module
    pub fn display_name(&self) -> String {
        if self.module == "builtins" {
            self.name.clone()
        } else {
            self.id()
        }
    }

    /// Set the docstring
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the declared bases
    pub fn with_bases<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bases = bases.into_iter().map(Into::into).collect();
        self
    }

    /// Set the resolution order (most-derived first)
    pub fn with_mro<I, S>(mut self, mro: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mro = mro.into_iter().map(Into::into).collect();
        self
    }

    /// Add a directly declared attribute
    pub fn with_attribute(mut self, name: impl Into<String>, attr: ClassAttribute) -> Self {
        self.attributes.insert(name.into(), attr);
        self
    }

    /// Set the special form
    pub fn with_form(mut self, form: TypeForm) -> Self {
        self.form = form;
        self
    }
}

/// Shape of a composite type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeForm {
    /// Regular class, documented through lineage resolution
    #[default]
    Plain,
    /// Enumeration: named constants and their values
    Enumeration(Vec<EnumConstant>),
    /// Fixed record (named tuple): fields in declaration order
    Record(Vec<RecordField>),
}

impl TypeForm {
    /// Whether this shape bypasses lineage resolution
    pub fn is_special(&self) -> bool {
        !matches!(self, TypeForm::Plain)
    }
}

/// Enumeration constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumConstant {
    /// Constant name
    pub name: String,
    /// Printable representation of the value
    pub value: String,
}

impl EnumConstant {
    /// Create a constant
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Fixed-record field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordField {
    /// Field name
    pub name: String,
    /// Field description
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doc: Option<String>,
}

impl RecordField {
    /// Create a field
    pub fn new(name: impl Into<String>, doc: Option<&str>) -> Self {
        Self {
            name: name.into(),
            doc: doc.map(String::from),
        }
    }
}

/// Kind hint for a class attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeKind {
    /// Plain data
    #[default]
    Field,
    /// Accessor-style member
    Property,
    /// Bound method, static function or class-level function
    Method,
}

/// How a callable member is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Binding {
    /// Regular method bound to instances
    #[default]
    Instance,
    /// Static function
    Static,
    /// Class-level function
    Class,
}

impl Binding {
    /// Decorator line shown above the signature
    pub fn decorator(&self) -> Option<&'static str> {
        match self {
            Binding::Instance => None,
            Binding::Static => Some("@staticmethod"),
            Binding::Class => Some("@classmethod"),
        }
    }
}

/// One attribute declared directly on a class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAttribute {
    /// Kind hint
    #[serde(default)]
    pub kind: AttributeKind,

    /// Docstring
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub doc: Option<String>,

    /// Call signature, for methods
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub signature: Option<String>,

    /// Printable representation of the value, for fields
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<String>,

    /// Method binding
    #[serde(default)]
    pub binding: Binding,

    /// Property has a getter
    #[serde(default)]
    pub getter: bool,

    /// Property has a setter
    #[serde(default)]
    pub setter: bool,

    /// Property has a deleter
    #[serde(default)]
    pub deleter: bool,
}

impl ClassAttribute {
    /// A plain data field
    pub fn field(value: impl Into<String>) -> Self {
        Self {
            kind: AttributeKind::Field,
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// A property with the given accessors
    pub fn property(getter: bool, setter: bool, deleter: bool) -> Self {
        Self {
            kind: AttributeKind::Property,
            getter,
            setter,
            deleter,
            ..Default::default()
        }
    }

    /// A method
    pub fn method(signature: impl Into<String>, binding: Binding) -> Self {
        Self {
            kind: AttributeKind::Method,
            signature: Some(signature.into()),
            binding,
            ..Default::default()
        }
    }

    /// Set the docstring
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_names() {
        assert!(is_reserved_name("__init__"));
        assert!(is_reserved_name("__all__"));
        assert!(!is_reserved_name("_private"));
        assert!(is_private_name("_private"));
        assert!(!is_private_name("public"));
    }

    #[test]
    fn test_type_identity() {
        let ty = TypeRecord::new("pkg.mod", "Animal");
        assert_eq!(ty.id(), "pkg.mod.Animal");
        assert_eq!(ty.mro, vec!["pkg.mod.Animal", ROOT_TYPE]);

        let builtin = TypeRecord::new("builtins", "tuple");
        assert_eq!(builtin.display_name(), "tuple");
    }

    #[test]
    fn test_deserialize_table() {
        let table = SymbolTable::from_json(
            r#"{
                "modules": [{
                    "name": "pkg.colors",
                    "attributes": {
                        "Color": { "kind": "class", "owner": "pkg.colors", "type": "pkg.colors.Color" },
                        "DEFAULT": { "value": "'red'" }
                    }
                }],
                "types": {
                    "pkg.colors.Color": {
                        "name": "Color",
                        "module": "pkg.colors",
                        "bases": ["enum.Enum"],
                        "form": { "enumeration": [{ "name": "RED", "value": "1" }] },
                        "attributes": {
                            "hex": { "kind": "property", "getter": true },
                            "mix": { "kind": "method", "binding": "static", "signature": "(a, b)" }
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let module = table.module("pkg.colors").unwrap();
        assert_eq!(module.attributes["Color"].kind, SymbolKind::Class);
        assert_eq!(module.attributes["DEFAULT"].kind, SymbolKind::Data);
        assert!(module.attributes["DEFAULT"].owner.is_none());

        let color = table.type_record("pkg.colors.Color").unwrap();
        assert_eq!(
            color.form,
            TypeForm::Enumeration(vec![EnumConstant::new("RED", "1")])
        );
        assert!(color.attributes["hex"].getter);
        assert!(!color.attributes["hex"].setter);
        assert_eq!(color.attributes["mix"].binding, Binding::Static);
    }

    #[test]
    fn test_plain_form_from_string() {
        let ty: TypeRecord =
            serde_json::from_str(r#"{ "name": "A", "module": "m", "form": "plain" }"#).unwrap();
        assert!(!ty.form.is_special());
    }

    #[test]
    fn test_json_roundtrip_keeps_attribute_order() {
        let table = SymbolTable::new().with_module(
            ModuleRecord::new("pkg.mod")
                .with_attribute("zeta", AttributeRecord::data("pkg.mod", "1"))
                .with_attribute("alpha", AttributeRecord::data("pkg.mod", "2")),
        );
        let back = SymbolTable::from_json(&table.to_json().unwrap()).unwrap();
        let names: Vec<_> = back.modules[0].attributes.keys().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_missing_file() {
        let err = SymbolTable::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DocError::FileNotFound(_)));
    }
}
