//! Reflection adapter
//!
//! The core never inspects source code itself. It asks a [`Reflection`]
//! implementation to enumerate the package's modules, to give a class's
//! resolution order and to list the attributes each type declares directly.
//! [`TableReflection`] answers from a [`SymbolTable`] and discovers modules by
//! walking the package directory.

use crate::diagnostics::{DocError, DocResult};
use crate::feed::{ClassAttribute, ModuleRecord, SymbolTable, TypeRecord, ROOT_TYPE};
use crate::mount::SearchPaths;
use crate::utils::paths::{build_absolute_path, build_module_name, split_relative_path};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Default extension of the source files belonging to a package
pub const SOURCE_EXTENSION: &str = "py";

/// A directly declared base class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseRef<'r> {
    /// Dotted identity as declared
    pub id: &'r str,
    /// The class record, when the adapter knows it
    pub record: Option<&'r TypeRecord>,
}

impl BaseRef<'_> {
    /// Name to display for the base
    pub fn display_name(&self) -> String {
        match self.record {
            Some(record) => record.display_name(),
            None => self
                .id
                .strip_prefix("builtins.")
                .unwrap_or(self.id)
                .to_string(),
        }
    }

    /// Defining module, from the record or the dotted identity
    pub fn module(&self) -> Option<String> {
        match self.record {
            Some(record) => Some(record.module.clone()),
            None => self.id.rsplit_once('.').map(|(module, _)| module.to_string()),
        }
    }

    /// Class name without its module
    pub fn name(&self) -> &str {
        match self.record {
            Some(record) => &record.name,
            None => self.id.rsplit_once('.').map_or(self.id, |(_, name)| name),
        }
    }
}

/// Source of modules, classes and attribute tables
pub trait Reflection {
    /// Enumerate the modules of the package at `root/package_path`, in
    /// discovery order
    fn enumerate_modules(&self, root: &Path, package_path: &str) -> DocResult<Vec<&ModuleRecord>>;

    /// Find a class by dotted identity
    fn lookup_type(&self, id: &str) -> Option<&TypeRecord>;

    /// Identity of the universal root type
    fn root_type(&self) -> &str {
        ROOT_TYPE
    }

    /// Resolution order from base-most to most-derived, root type excluded.
    ///
    /// Entries the adapter cannot resolve are skipped.
    fn resolution_order<'r>(&'r self, class: &'r TypeRecord) -> Vec<&'r TypeRecord> {
        let class_id = class.id();
        let mut order: Vec<&TypeRecord> = Vec::with_capacity(class.mro.len());

        for id in &class.mro {
            if id == self.root_type() {
                continue;
            }
            if *id == class_id {
                order.push(class);
            } else if let Some(ty) = self.lookup_type(id) {
                order.push(ty);
            } else {
                tracing::debug!("`{}`: skipping unresolved ancestor `{}`", class_id, id);
            }
        }
        if order.is_empty() {
            order.push(class);
        }

        order.reverse();
        order
    }

    /// Attributes declared directly on `ty`
    fn direct_attributes<'r>(&'r self, ty: &'r TypeRecord) -> &'r IndexMap<String, ClassAttribute> {
        &ty.attributes
    }

    /// Directly declared bases of `class` (not the resolution order)
    fn declared_bases<'r>(&'r self, class: &'r TypeRecord) -> Vec<BaseRef<'r>> {
        class
            .bases
            .iter()
            .map(|id| BaseRef {
                id: id.as_str(),
                record: self.lookup_type(id),
            })
            .collect()
    }
}

/// Reflection adapter backed by a symbol table
#[derive(Debug)]
pub struct TableReflection {
    table: SymbolTable,
    search_paths: SearchPaths,
}

impl TableReflection {
    /// Create an adapter over `table`
    pub fn new(table: SymbolTable) -> Self {
        Self {
            table,
            search_paths: SearchPaths::new(),
        }
    }

    /// Get the symbol table
    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Get the module search path
    pub fn search_paths(&self) -> &SearchPaths {
        &self.search_paths
    }

    /// Source files of the package, directory-then-filename sorted: the files
    /// of a directory come first in name order, then each sub-directory in
    /// name order.
    pub fn discover(&self, package_dir: &Path) -> DocResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(package_dir).sort_by(walk_order) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == SOURCE_EXTENSION);
            if matches {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Load the module defined by `file`; only works while its package is
    /// mounted
    fn load_module(&self, name: &str, file: &Path) -> DocResult<&ModuleRecord> {
        let importable = self
            .search_paths
            .snapshot()
            .iter()
            .any(|path| file.starts_with(path));
        if !importable {
            return Err(DocError::module_load(
                name,
                file,
                "file is not under a mounted search path",
            ));
        }

        self.table
            .module(name)
            .ok_or_else(|| DocError::module_load(name, file, "no record in the symbol table"))
    }
}

impl Reflection for TableReflection {
    fn enumerate_modules(&self, root: &Path, package_path: &str) -> DocResult<Vec<&ModuleRecord>> {
        if split_relative_path(package_path).is_empty() {
            return Err(DocError::config("pkg_dir shouldn't be empty"));
        }
        let package_dir = build_absolute_path(root, package_path);
        if !package_dir.is_dir() {
            return Err(DocError::config(format!(
                "package directory not found: {}",
                package_dir.display()
            )));
        }

        self.search_paths.with_project(root, package_path, || {
            let files = self.discover(&package_dir)?;
            tracing::debug!(
                "discovered {} source files in {}",
                files.len(),
                package_dir.display()
            );

            let mut modules = Vec::with_capacity(files.len());
            for file in &files {
                let name = build_module_name(root, package_path, file).ok_or_else(|| {
                    DocError::module_load("?", file, "cannot derive a dotted module name")
                })?;
                modules.push(self.load_module(&name, file)?);
            }
            Ok(modules)
        })
    }

    fn lookup_type(&self, id: &str) -> Option<&TypeRecord> {
        self.table.type_record(id)
    }
}

/// Files before directories, then by name
fn walk_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::ClassAttribute;
    use crate::test::{sample_project, sample_table};
    use std::fs;
    use tempfile::TempDir;

    fn ids(order: &[&TypeRecord]) -> Vec<String> {
        order.iter().map(|t| t.id()).collect()
    }

    #[test]
    fn test_discovery_order() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("pkg");
        fs::create_dir_all(pkg.join("a_sub")).unwrap();
        fs::create_dir_all(pkg.join("b_sub")).unwrap();
        for file in ["z.py", "a.py", "a_sub/m.py", "b_sub/c.py", "notes.txt"] {
            fs::write(pkg.join(file), "").unwrap();
        }

        let reflection = TableReflection::new(SymbolTable::new());
        let files: Vec<_> = reflection
            .discover(&pkg)
            .unwrap()
            .into_iter()
            .map(|f| f.strip_prefix(&pkg).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(files, vec!["a.py", "z.py", "a_sub/m.py", "b_sub/c.py"]);
    }

    #[test]
    fn test_enumerate_modules_unmounts() {
        let temp = TempDir::new().unwrap();
        sample_project(temp.path()).unwrap();
        let reflection = TableReflection::new(sample_table());

        let modules = reflection
            .enumerate_modules(temp.path(), "src/my_project")
            .unwrap();
        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "my_project.__init__",
                "my_project.package1.module1",
                "my_project.package2.module2"
            ]
        );
        assert!(reflection.search_paths().is_empty());
    }

    #[test]
    fn test_missing_record_is_module_load_error() {
        let temp = TempDir::new().unwrap();
        sample_project(temp.path()).unwrap();
        fs::write(temp.path().join("src/my_project/extra.py"), "").unwrap();
        let reflection = TableReflection::new(sample_table());

        let err = reflection
            .enumerate_modules(temp.path(), "src/my_project")
            .unwrap_err();
        assert!(matches!(err, DocError::ModuleLoad { ref module, .. } if module == "my_project.extra"));
        assert!(reflection.search_paths().is_empty());
    }

    #[test]
    fn test_configuration_errors() {
        let temp = TempDir::new().unwrap();
        let reflection = TableReflection::new(SymbolTable::new());
        assert!(reflection
            .enumerate_modules(temp.path(), "")
            .unwrap_err()
            .is_config());
        assert!(reflection
            .enumerate_modules(temp.path(), "src/missing")
            .unwrap_err()
            .is_config());
    }

    #[test]
    fn test_resolution_order_excludes_root() {
        let table = SymbolTable::new()
            .with_type(TypeRecord::new("m", "A"))
            .with_type(
                TypeRecord::new("m", "B")
                    .with_bases(["m.A"])
                    .with_mro(["m.B", "m.A", ROOT_TYPE]),
            );
        let reflection = TableReflection::new(table);
        let b = reflection.lookup_type("m.B").unwrap();
        assert_eq!(ids(&reflection.resolution_order(b)), vec!["m.A", "m.B"]);
    }

    #[test]
    fn test_resolution_order_skips_unknown_ancestors() {
        let table = SymbolTable::new().with_type(
            TypeRecord::new("m", "Color")
                .with_bases(["enum.Enum"])
                .with_mro(["m.Color", "enum.Enum", ROOT_TYPE]),
        );
        let reflection = TableReflection::new(table);
        let color = reflection.lookup_type("m.Color").unwrap();
        assert_eq!(ids(&reflection.resolution_order(color)), vec!["m.Color"]);

        let bases = reflection.declared_bases(color);
        assert_eq!(bases.len(), 1);
        assert!(bases[0].record.is_none());
        assert_eq!(bases[0].display_name(), "enum.Enum");
        assert_eq!(bases[0].name(), "Enum");
        assert_eq!(bases[0].module().as_deref(), Some("enum"));
    }

    #[test]
    fn test_direct_attributes() {
        let table = SymbolTable::new()
            .with_type(TypeRecord::new("m", "A").with_attribute("x", ClassAttribute::field("1")));
        let reflection = TableReflection::new(table);
        let a = reflection.lookup_type("m.A").unwrap();
        assert!(reflection.direct_attributes(a).contains_key("x"));
    }
}
