//! Writing a change plan to disk

use crate::diff::{ChangePlan, FileOperation};
use crate::util::{safe_join, PathError};
use std::fs;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during apply
#[derive(Error, Debug)]
pub enum ApplyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File already exists: {0}")]
    FileExists(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Path security error: {0}")]
    PathSecurity(#[from] PathError),
}

/// Apply every operation of a plan under its project root
///
/// Creates never overwrite and modifications require the file to exist.
///
/// # Errors
/// Returns an error if any operation fails
pub fn apply_plan(plan: &ChangePlan) -> Result<(), ApplyError> {
    for operation in &plan.operations {
        let full_path = safe_join(&plan.project_root, operation.path())?;
        match operation {
            FileOperation::Create { content, .. } => {
                if full_path.exists() {
                    return Err(ApplyError::FileExists(full_path.display().to_string()));
                }
                if let Some(parent) = full_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&full_path, content)?;
                info!(path = %full_path.display(), "created");
            }
            FileOperation::Modify { new_content, .. } => {
                if !full_path.exists() {
                    return Err(ApplyError::FileNotFound(full_path.display().to_string()));
                }
                fs::write(&full_path, new_content)?;
                info!(path = %full_path.display(), "updated");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_creates_and_modifies() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pom.xml"), "old").unwrap();

        let mut plan = ChangePlan::new(dir.path());
        plan.modify("pom.xml", "old", "new");
        plan.create("src/main/resources/a.properties", "x=1");
        apply_plan(&plan).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("pom.xml")).unwrap(), "new");
        assert!(dir.path().join("src/main/resources/a.properties").exists());
    }

    #[test]
    fn test_apply_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "keep").unwrap();

        let mut plan = ChangePlan::new(dir.path());
        plan.create("a.txt", "clobber");

        assert!(matches!(apply_plan(&plan), Err(ApplyError::FileExists(_))));
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "keep");
    }
}
