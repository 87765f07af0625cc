//! Project path handling
//!
//! Relative paths in the configuration (`pkg_dir`, `api_dir`) always use `/`
//! as separator, whatever the platform.

use crate::diagnostics::{DocError, DocResult};
use std::path::{Path, PathBuf};

/// Split a slash-separated relative path into its non-empty parts.
///
/// # Examples
///
/// ```
/// use mikedoc::utils::paths::split_relative_path;
///
/// assert_eq!(split_relative_path("./src/my_pkg/"), vec!["src", "my_pkg"]);
/// assert!(split_relative_path("").is_empty());
/// ```
pub fn split_relative_path(path: &str) -> Vec<&str> {
    let path = path.trim_matches('/');
    let path = path.strip_prefix("./").unwrap_or(path);
    path.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect()
}

/// Join a slash-separated relative path onto `root`
pub fn build_absolute_path(root: &Path, relative: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for part in split_relative_path(relative) {
        path.push(part);
    }
    path
}

/// Directory to register on the module search path so that the package is
/// importable: the parent of the package directory.
pub fn mount_path(root: &Path, pkg_dir: &str) -> DocResult<PathBuf> {
    let parts = split_relative_path(pkg_dir);
    match parts.len() {
        0 => Err(DocError::config("pkg_dir shouldn't be empty")),
        1 => Ok(root.to_path_buf()),
        n => {
            let mut path = root.to_path_buf();
            path.extend(&parts[..n - 1]);
            Ok(path)
        }
    }
}

/// Dotted module name of a source file living under the package directory.
///
/// The package directory name is the first component:
/// `<root>/src/pkg/sub/mod.py` with `pkg_dir = "src/pkg"` gives `pkg.sub.mod`.
/// Returns `None` when the file is outside the package.
pub fn build_module_name(root: &Path, pkg_dir: &str, file: &Path) -> Option<String> {
    let package = build_absolute_path(root, pkg_dir);
    let relative = file.strip_prefix(&package).ok()?;
    let package_name = package.file_name()?.to_str()?;

    let mut parts = vec![package_name.to_string()];
    let components: Vec<_> = relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    let (last, dirs) = components.split_last()?;
    parts.extend(dirs.iter().map(|d| d.to_string()));
    let stem = Path::new(last).file_stem()?.to_str()?;
    parts.push(stem.to_string());

    Some(parts.join("."))
}

/// Url of a page inside the API directory.
///
/// Without a module the url points at the API home page.
pub fn build_api_url(api_dir: &str, module_name: Option<&str>, basename: &str) -> String {
    let api_dir = api_dir.trim_matches(|c| c == '.' || c == '/');
    match module_name {
        Some(module) => format!(
            "/{}/modules/{}/{}",
            api_dir,
            module.replace('.', "/"),
            basename
        ),
        None => format!("/{}/{}", api_dir, basename),
    }
}

/// Url of the source file a module was loaded from
pub fn build_src_url(pkg_dir: &str, module_name: &str) -> String {
    let pkg_dir = pkg_dir.trim_matches(|c| c == '.' || c == '/');
    let module_path = module_name
        .split('.')
        .skip(1)
        .collect::<Vec<_>>()
        .join("/");
    format!("/{}/{}.py", pkg_dir, module_path)
}

/// Last component of the package directory: the top-level package name
pub fn package_name(pkg_dir: &str) -> Option<&str> {
    split_relative_path(pkg_dir).last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_relative_path() {
        assert_eq!(split_relative_path("my_package"), vec!["my_package"]);
        assert_eq!(split_relative_path("/src/my_package/"), vec!["src", "my_package"]);
        assert_eq!(split_relative_path("./docs/api"), vec!["docs", "api"]);
        assert!(split_relative_path("/").is_empty());
    }

    #[test]
    fn test_mount_path() {
        let root = Path::new("/project");
        assert_eq!(mount_path(root, "pkg").unwrap(), PathBuf::from("/project"));
        assert_eq!(
            mount_path(root, "src/pkg").unwrap(),
            PathBuf::from("/project/src")
        );
        assert!(mount_path(root, "").unwrap_err().is_config());
    }

    #[test]
    fn test_build_module_name() {
        let root = Path::new("/project");
        assert_eq!(
            build_module_name(
                root,
                "src/my_project",
                Path::new("/project/src/my_project/package1/module1.py")
            ),
            Some("my_project.package1.module1".to_string())
        );
        assert_eq!(
            build_module_name(
                root,
                "src/my_project",
                Path::new("/project/src/my_project/__init__.py")
            ),
            Some("my_project.__init__".to_string())
        );
        assert_eq!(
            build_module_name(root, "src/my_project", Path::new("/elsewhere/x.py")),
            None
        );
    }

    #[test]
    fn test_build_api_url() {
        assert_eq!(build_api_url("docs/api", None, "README.md"), "/docs/api/README.md");
        assert_eq!(
            build_api_url("./docs/api/", Some("pkg.sub.mod"), "funcs.md"),
            "/docs/api/modules/pkg/sub/mod/funcs.md"
        );
    }

    #[test]
    fn test_build_src_url() {
        assert_eq!(
            build_src_url("src/my_project", "my_project.package1.module1"),
            "/src/my_project/package1/module1.py"
        );
        assert_eq!(
            build_src_url("my_project", "my_project.__init__"),
            "/my_project/__init__.py"
        );
    }

    #[test]
    fn test_package_name() {
        assert_eq!(package_name("src/my_project"), Some("my_project"));
        assert_eq!(package_name(""), None);
    }
}
