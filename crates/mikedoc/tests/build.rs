//! End-to-end build of the sample project: config file, symbol table file,
//! discovery, rendering and the API directory on disk.

use mikedoc::config::{self, MikeConfig};
use mikedoc::test::{sample_project_with_symbols, SAMPLE_PKG_DIR};
use mikedoc::{DocBuilder, DocError};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_config(root: &Path) {
    let text = format!(
        "project_name = \"MyProject\"\nproject_url = \"/README.md\"\npkg_dir = \"{}\"\napi_dir = \"docs/api\"\n",
        SAMPLE_PKG_DIR
    );
    fs::write(MikeConfig::path(root), text).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn test_build_from_config_file() {
    let temp = TempDir::new().unwrap();
    sample_project_with_symbols(temp.path()).unwrap();
    write_config(temp.path());

    let output = DocBuilder::from_project_root(temp.path())
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(output.module_count, 3);

    let home = read(temp.path(), "docs/api/README.md");
    assert!(home.starts_with("# MyProject API Reference\n"));
    assert!(home.contains("[my\\_project.package1.module1](/docs/api/modules/my_project/package1/module1/README.md)"));

    let marker = read(temp.path(), "docs/api/MIKEDOC");
    assert!(marker.contains("MikeDoc"));

    let funcs = read(temp.path(), "docs/api/modules/my_project/package1/module1/funcs.md");
    assert!(funcs.contains("def my_func2(arg, code=420, name='alexr'):"));
    assert!(funcs.contains("| arg | Argument |"));
    assert!(funcs.contains("### Value to return\nAn integer"));
    assert!(funcs.contains("### Value to yield\nIntegers"));
}

#[test]
fn test_rebuild_is_stable() {
    let temp = TempDir::new().unwrap();
    sample_project_with_symbols(temp.path()).unwrap();
    write_config(temp.path());

    let first = DocBuilder::from_project_root(temp.path())
        .unwrap()
        .build()
        .unwrap();
    let before: Vec<String> = first.files.iter().map(|f| fs::read_to_string(f).unwrap()).collect();

    let second = DocBuilder::from_project_root(temp.path())
        .unwrap()
        .build()
        .unwrap();
    let after: Vec<String> = second.files.iter().map(|f| fs::read_to_string(f).unwrap()).collect();

    assert_eq!(first.files, second.files);
    assert_eq!(before, after);
}

#[test]
fn test_init_then_build_without_symbols_fails() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("my-project");
    fs::create_dir_all(root.join("src/my_project")).unwrap();

    assert!(config::init(&root).unwrap());
    let loaded = MikeConfig::load(&root).unwrap();
    assert_eq!(loaded.pkg_dir, "src/my_project");

    let err = loaded.into_builder(&root).build().unwrap_err();
    assert!(matches!(err, DocError::FileNotFound(_)));
    assert!(!root.join("docs/api").exists());
}
