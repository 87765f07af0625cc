//! Command implementations
//!
//! Each command works on the project at `root`.

use anyhow::{Context, Result};
use mikedoc::config::{self, MikeConfig, CONFIG_FILENAME};
use mikedoc::{DocBuilder, DocPrinter};
use std::path::Path;

/// Create the config file
pub fn init(root: &Path, quiet: bool) -> Result<()> {
    let created = config::init(root)
        .with_context(|| format!("Failed to create {} in {}", CONFIG_FILENAME, root.display()))?;

    if !quiet {
        if created {
            println!("Config file '{}' created !", CONFIG_FILENAME);
        } else {
            println!("Config file '{}' already exists.", CONFIG_FILENAME);
        }
    }
    Ok(())
}

/// Build the API reference
pub fn build(root: &Path, quiet: bool) -> Result<()> {
    let config = load_config(root)?;
    let api_dir = config.api_dir.clone();

    let output = config
        .into_builder(root)
        .build()
        .context("Failed to build the API reference")?;

    for diagnostic in &output.diagnostics {
        if diagnostic.is_warning() {
            tracing::warn!("{}", diagnostic.format());
        } else {
            tracing::debug!("{}", diagnostic.format());
        }
    }

    if !quiet {
        println!(
            "API reference built in '{}' ! ({} modules, {} pages)",
            api_dir,
            output.module_count,
            output.files.len()
        );
    }
    Ok(())
}

/// Print the documentation model
pub fn list(root: &Path) -> Result<()> {
    let builder: DocBuilder = load_config(root)?.into_builder(root);
    let reflection = builder
        .reflection()
        .context("Failed to load the symbol table")?;
    let (modules, _) = builder
        .browse(&reflection)
        .context("Failed to browse the package")?;

    DocPrinter::new(&modules, true).print_to_stdout();
    Ok(())
}

fn load_config(root: &Path) -> Result<MikeConfig> {
    MikeConfig::load(root).with_context(|| {
        format!(
            "Invalid or missing {}. Run the 'init' command in the root dir.",
            CONFIG_FILENAME
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mikedoc::test::{sample_project_with_symbols, SAMPLE_PKG_DIR};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_build() {
        let temp = TempDir::new().unwrap();
        sample_project_with_symbols(temp.path()).unwrap();
        init(temp.path(), true).unwrap();

        let mut config = MikeConfig::load(temp.path()).unwrap();
        config.pkg_dir = SAMPLE_PKG_DIR.to_string();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            toml::to_string(&config).unwrap(),
        )
        .unwrap();

        build(temp.path(), true).unwrap();
        assert!(temp.path().join("docs/api/README.md").is_file());
    }

    #[test]
    fn test_build_without_config_fails() {
        let temp = TempDir::new().unwrap();
        let err = build(temp.path(), true).unwrap_err();
        assert!(err.to_string().contains("Run the 'init' command"));
    }
}
