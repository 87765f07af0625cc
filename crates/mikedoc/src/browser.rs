//! Symbol model builder
//!
//! The [`Browser`] asks the reflection adapter for the modules of a package
//! and turns each one into a [`ModuleDescriptor`]: members selected and sorted,
//! classified as field, callable or class, and for classes the lineage-resolved
//! member list. Descriptors borrow from the adapter.

use crate::class::ClassDescriptor;
use crate::classify::{resolve_class_members, select_module_members};
use crate::diagnostics::{Diagnostic, DiagnosticsCollector, DocResult};
use crate::feed::{AttributeRecord, ModuleRecord, SymbolKind, TypeRecord, CONSTRUCTOR_NAME};
use crate::member::{MemberDescriptor, MemberKind};
use crate::module::ModuleDescriptor;
use crate::reflection::Reflection;
use crate::utils::text::drop_receiver;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Builds the documentation model of one package
pub struct Browser<'r, R: Reflection + ?Sized> {
    reflection: &'r R,
    root: PathBuf,
    pkg_dir: String,
    diagnostics: DiagnosticsCollector,
}

impl<'r, R: Reflection + ?Sized> Browser<'r, R> {
    /// Create a browser over the package `pkg_dir` of the project at `root`
    pub fn new(reflection: &'r R, root: impl Into<PathBuf>, pkg_dir: impl Into<String>) -> Self {
        Self {
            reflection,
            root: root.into(),
            pkg_dir: pkg_dir.into(),
            diagnostics: DiagnosticsCollector::new(),
        }
    }

    /// Get the project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the package directory
    pub fn pkg_dir(&self) -> &str {
        &self.pkg_dir
    }

    /// Describe every module of the package, in discovery order.
    ///
    /// Configuration and load failures abort the whole pass.
    pub fn list_modules(&mut self) -> DocResult<Vec<ModuleDescriptor<'r>>> {
        let reflection = self.reflection;
        let records = reflection.enumerate_modules(&self.root, &self.pkg_dir)?;
        tracing::debug!("browsing {} modules", records.len());

        Ok(records
            .into_iter()
            .map(|record| self.inspect_module(record))
            .collect())
    }

    /// Describe one module
    pub fn inspect_module(&mut self, record: &'r ModuleRecord) -> ModuleDescriptor<'r> {
        let members: Vec<_> = select_module_members(record)
            .into_iter()
            .map(|(name, attr)| self.create_member(record, name, attr))
            .collect();

        tracing::debug!("module `{}`: {} members", record.name, members.len());
        if members.is_empty() {
            self.diagnostics
                .add(Diagnostic::info("module exports nothing").in_module(&record.name));
        }

        ModuleDescriptor::new(record, members)
    }

    /// Describe one module attribute
    pub fn create_member(
        &mut self,
        module: &ModuleRecord,
        name: &str,
        attr: &'r AttributeRecord,
    ) -> MemberDescriptor<'r> {
        match attr.kind {
            SymbolKind::Function => MemberDescriptor::new(
                name,
                attr,
                attr.doc.as_deref(),
                attr.signature.as_deref().map(Cow::Borrowed),
                MemberKind::Callable,
            ),
            SymbolKind::Data => MemberDescriptor::new(
                name,
                attr,
                attr.doc.as_deref(),
                None,
                MemberKind::Field,
            ),
            SymbolKind::Class => {
                let record = self.class_record(module, name, attr);
                let doc = attr
                    .doc
                    .as_deref()
                    .or_else(|| record.and_then(|r| r.doc.as_deref()));
                let signature = match attr.signature.as_deref() {
                    Some(signature) => Some(Cow::Borrowed(signature)),
                    None => record
                        .and_then(|r| r.attributes.get(CONSTRUCTOR_NAME))
                        .and_then(|init| init.signature.as_deref())
                        .map(|init| Cow::Owned(drop_receiver(init))),
                };
                let class = match record {
                    Some(record) => self.describe_class(module, record),
                    None => ClassDescriptor::default(),
                };
                MemberDescriptor::new(name, attr, doc, signature, MemberKind::Class(class))
            }
        }
    }

    /// Bases and members of a class; special forms skip the lineage walk
    pub fn describe_class(
        &mut self,
        module: &ModuleRecord,
        record: &'r TypeRecord,
    ) -> ClassDescriptor<'r> {
        let bases = self.reflection.declared_bases(record);
        for base in bases.iter().filter(|b| b.record.is_none()) {
            if base.id == self.reflection.root_type() {
                continue;
            }
            tracing::debug!("`{}`: base `{}` kept by name", record.id(), base.id);
            self.diagnostics.add(
                Diagnostic::info(format!(
                    "base `{}` of `{}` is not in the symbol table",
                    base.id, record.name
                ))
                .in_module(&module.name),
            );
        }

        let members = if record.form.is_special() {
            Vec::new()
        } else {
            resolve_class_members(self.reflection, record)
        };
        tracing::debug!("class `{}`: {} members", record.id(), members.len());

        ClassDescriptor {
            record: Some(record),
            bases,
            members,
        }
    }

    fn class_record(
        &mut self,
        module: &ModuleRecord,
        name: &str,
        attr: &AttributeRecord,
    ) -> Option<&'r TypeRecord> {
        let id = match &attr.type_ref {
            Some(id) => id.clone(),
            None => format!("{}.{}", attr.owner.as_deref().unwrap_or(&module.name), name),
        };
        let record = self.reflection.lookup_type(&id);
        if record.is_none() {
            tracing::warn!("class `{}` has no record in the symbol table", id);
            self.diagnostics.add(
                Diagnostic::warning(format!("class `{}` has no record in the symbol table", id))
                    .in_module(&module.name),
            );
        }
        record
    }

    /// Get the collected diagnostics
    pub fn diagnostics(&self) -> &DiagnosticsCollector {
        &self.diagnostics
    }

    /// Take the collected diagnostics
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Binding, ClassAttribute, SymbolTable, TypeForm};
    use crate::reflection::TableReflection;
    use crate::test::{sample_project, sample_table};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn member_names(module: &ModuleDescriptor) -> Vec<String> {
        module.members.iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn test_list_modules() {
        let temp = TempDir::new().unwrap();
        sample_project(temp.path()).unwrap();
        let reflection = TableReflection::new(sample_table());
        let mut browser = Browser::new(&reflection, temp.path(), "src/my_project");

        let modules = browser.list_modules().unwrap();
        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "my_project.__init__",
                "my_project.package1.module1",
                "my_project.package2.module2"
            ]
        );

        let module1 = &modules[1];
        assert_eq!(
            member_names(module1),
            vec!["CODE", "MyClass1", "MyClass2", "NAME", "my_func1", "my_func2", "my_generator"]
        );
        assert_eq!(module1.fields().len(), 2);
        assert_eq!(module1.callables().len(), 3);
        assert_eq!(module1.classes().len(), 2);
    }

    #[test]
    fn test_class_member_inherits_lineage() {
        let temp = TempDir::new().unwrap();
        sample_project(temp.path()).unwrap();
        let reflection = TableReflection::new(sample_table());
        let mut browser = Browser::new(&reflection, temp.path(), "src/my_project");
        let modules = browser.list_modules().unwrap();

        let my_class2 = modules[1].member("MyClass2").unwrap();
        let class = my_class2.class().unwrap();
        assert_eq!(class.bases.len(), 1);
        assert_eq!(class.bases[0].id, "my_project.package1.module1.MyClass1");
        assert!(class.members[0].is_constructor());
        assert_eq!(my_class2.signature(), Some("(arg, name='alex', code=42)"));
        assert_eq!(my_class2.docstring.description(), Some("Docstring for the class"));

        let method = class.members.iter().find(|m| m.name == "method").unwrap();
        let lineage: Vec<_> = method.lineage.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(lineage, vec!["MyClass2", "MyClass1"]);
        assert_eq!(method.docstring.description(), Some("New docstring"));

        let names: Vec<_> = class.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["__init__", "class_method", "method", "new_method", "static_method"]
        );
    }

    #[test]
    fn test_special_forms_have_empty_members() {
        let temp = TempDir::new().unwrap();
        sample_project(temp.path()).unwrap();
        let reflection = TableReflection::new(sample_table());
        let mut browser = Browser::new(&reflection, temp.path(), "src/my_project");
        let modules = browser.list_modules().unwrap();

        let module2 = &modules[2];
        let my_enum = module2.member("MyEnum").unwrap().class().unwrap();
        assert!(my_enum.is_enumeration());
        assert!(my_enum.members.is_empty());
        assert_eq!(my_enum.constants().len(), 2);

        let user = module2.member("User").unwrap().class().unwrap();
        assert!(user.is_record());
        assert!(user.members.is_empty());
        let fields: Vec<_> = user.record_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, vec!["code", "name"]);
    }

    #[test]
    fn test_imported_name_excluded() {
        let module = ModuleRecord::new("pkg.mod")
            .with_attribute("Path", AttributeRecord::class("pathlib", "pathlib.Path"))
            .with_attribute("run", AttributeRecord::function("pkg.mod", "()"));
        let reflection = TableReflection::new(SymbolTable::new());
        let mut browser = Browser::new(&reflection, "/project", "pkg");

        let descriptor = browser.inspect_module(&module);
        assert_eq!(member_names(&descriptor), vec!["run"]);
        assert!(descriptor.members[0].is_callable());
    }

    #[test]
    fn test_missing_class_record_is_diagnosed() {
        let module = ModuleRecord::new("pkg.mod")
            .with_attribute("Ghost", AttributeRecord::class("pkg.mod", "pkg.mod.Ghost"));
        let reflection = TableReflection::new(SymbolTable::new());
        let mut browser = Browser::new(&reflection, "/project", "pkg");

        let descriptor = browser.inspect_module(&module);
        let ghost = descriptor.members[0].class().unwrap();
        assert!(ghost.record.is_none());
        assert!(ghost.members.is_empty());
        assert_eq!(browser.diagnostics().warning_count(), 1);
    }

    #[test]
    fn test_unresolved_base_kept_by_name() {
        let table = SymbolTable::new().with_type(
            TypeRecord::new("pkg.mod", "Color")
                .with_bases(["enum.Enum"])
                .with_form(TypeForm::Enumeration(Vec::new()))
                .with_attribute("hex", ClassAttribute::property(true, false, false)),
        );
        let module = ModuleRecord::new("pkg.mod")
            .with_attribute("Color", AttributeRecord::class("pkg.mod", "pkg.mod.Color"));
        let reflection = TableReflection::new(table);
        let mut browser = Browser::new(&reflection, "/project", "pkg");

        let descriptor = browser.inspect_module(&module);
        let color = descriptor.members[0].class().unwrap();
        assert_eq!(color.bases[0].id, "enum.Enum");
        assert!(color.bases[0].record.is_none());
        assert!(color.members.is_empty());
        assert_eq!(browser.take_diagnostics().len(), 1);
    }

    #[test]
    fn test_class_signature_falls_back_to_constructor() {
        let table = SymbolTable::new().with_type(
            TypeRecord::new("pkg.mod", "Point")
                .with_attribute("__init__", ClassAttribute::method("(self, x, y=0)", Binding::Instance)),
        );
        let module = ModuleRecord::new("pkg.mod")
            .with_attribute("Point", AttributeRecord::class("pkg.mod", "pkg.mod.Point"))
            .with_attribute(
                "Pair",
                AttributeRecord::class("pkg.mod", "pkg.mod.Point").with_signature("(left, right)"),
            );
        let reflection = TableReflection::new(table);
        let mut browser = Browser::new(&reflection, "/project", "pkg");

        let descriptor = browser.inspect_module(&module);
        let signatures: Vec<_> = descriptor.members.iter().map(|m| m.signature()).collect();
        assert_eq!(signatures, vec![Some("(left, right)"), Some("(x, y=0)")]);
    }
}
