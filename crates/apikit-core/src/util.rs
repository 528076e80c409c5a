//! Path validation and naming helpers

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors related to path validation
#[derive(Error, Debug)]
pub enum PathError {
    #[error("Path traversal attempt detected: {0}")]
    TraversalAttempt(String),

    #[error("Path escapes root directory: {0}")]
    EscapesRoot(String),

    #[error("Invalid path component: {0}")]
    InvalidComponent(String),
}

/// Join a relative path onto `root`, refusing anything that leaves it
///
/// # Errors
/// Returns an error for absolute paths, `..` above the root, or a resolved
/// location outside `root`
pub fn safe_join(root: &Path, relative: &Path) -> Result<PathBuf, PathError> {
    let mut normalized = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                if part.to_string_lossy().contains('\0') {
                    return Err(PathError::InvalidComponent("Null byte in path".into()));
                }
                normalized.push(part);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(PathError::TraversalAttempt(relative.display().to_string()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(PathError::InvalidComponent(
                    "Absolute path not allowed".into(),
                ));
            }
        }
    }

    let joined = root.join(normalized);
    let escapes = if root.exists() && joined.exists() {
        // symlinks can still point outside
        match (root.canonicalize(), joined.canonicalize()) {
            (Ok(r), Ok(j)) => !j.starts_with(r),
            _ => true,
        }
    } else {
        !joined.starts_with(root)
    };
    if escapes {
        return Err(PathError::EscapesRoot(joined.display().to_string()));
    }
    Ok(joined)
}

/// Validate a single path segment such as a backup id
///
/// # Errors
/// Returns an error for empty, hidden, or separator-bearing names
pub fn validate_name(name: &str) -> Result<(), PathError> {
    if name.is_empty() {
        return Err(PathError::InvalidComponent("Empty name".into()));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(PathError::TraversalAttempt(format!(
            "Name contains path separator or parent reference: {name}"
        )));
    }
    if name.starts_with('.') || name.contains('\0') {
        return Err(PathError::InvalidComponent(format!("Invalid name: {name}")));
    }
    Ok(())
}

/// Upper-case the first character: `hello` becomes `Hello`
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Dotted package name as a relative directory
#[must_use]
pub fn package_dir(package: &str) -> PathBuf {
    package.split('.').filter(|p| !p.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_join_normal() {
        let root = PathBuf::from("/work/camel-hello");
        let result = safe_join(&root, Path::new("src/main/java/./Foo.java")).unwrap();
        assert_eq!(result, PathBuf::from("/work/camel-hello/src/main/java/Foo.java"));
    }

    #[test]
    fn test_safe_join_rejects_traversal() {
        let root = PathBuf::from("/work/camel-hello");
        assert!(safe_join(&root, Path::new("../etc/passwd")).is_err());
        assert!(safe_join(&root, Path::new("src/../../etc")).is_err());
        assert!(safe_join(&root, Path::new("/etc/passwd")).is_err());
        assert!(safe_join(&root, Path::new("src/../pom.xml")).is_ok());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("3f2b8c1e-9a4d-4c7e-b1f0-2d6e8a9c0b13").is_ok());
        assert!(validate_name("../etc").is_err());
        assert!(validate_name("foo/bar").is_err());
        assert!(validate_name(".hidden").is_err());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn test_capitalize_and_package_dir() {
        assert_eq!(capitalize("hello"), "Hello");
        assert_eq!(capitalize(""), "");
        assert_eq!(
            package_dir("org.apache.camel.component.hello"),
            PathBuf::from("org/apache/camel/component/hello")
        );
    }
}
