//! Backup creation for rollback support

use crate::backup::Backup;
use crate::diff::{ChangePlan, FileOperation};
use crate::util::{safe_join, PathError};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors during backup creation
#[derive(Error, Debug)]
pub enum BackupCreateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize backup: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Path security error: {0}")]
    PathSecurity(#[from] PathError),
}

/// Record the current state of every file a plan touches
///
/// The backup is written to `<backup_dir>/<id>.json` before returning.
///
/// # Errors
/// Returns an error if a file cannot be read or the backup cannot be written
pub fn create_backup(
    plan: &ChangePlan,
    backup_dir: &Path,
    description: &str,
) -> Result<Backup, BackupCreateError> {
    fs::create_dir_all(backup_dir)?;

    let mut backup = Backup::new(plan.project_root.clone(), description);

    for op in &plan.operations {
        let full_path = safe_join(&plan.project_root, op.path())?;
        let path = op.path().to_path_buf();
        if matches!(op, FileOperation::Modify { .. }) && full_path.exists() {
            let content = fs::read(&full_path)?;
            let sha256 = hash_content(&content);
            backup.record_present(path, content, sha256);
        } else {
            backup.record_absent(path);
        }
    }

    let archive_path = backup_dir.join(backup.file_name());
    fs::write(&archive_path, serde_json::to_string_pretty(&backup)?)?;
    debug!(id = %backup.id, path = %archive_path.display(), "backup written");

    Ok(backup)
}

pub(crate) fn hash_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::OriginalState;
    use tempfile::TempDir;

    #[test]
    fn test_backup_records_existing_and_new_files() {
        let project = TempDir::new().unwrap();
        let backups = TempDir::new().unwrap();
        fs::write(project.path().join("pom.xml"), "<project/>").unwrap();

        let mut plan = ChangePlan::new(project.path());
        plan.modify("pom.xml", "<project/>", "<project></project>");
        plan.create("src/Foo.java", "class Foo {}");

        let backup = create_backup(&plan, backups.path(), "test").unwrap();
        assert_eq!(backup.files.len(), 2);
        assert_eq!(
            backup.files[0].state,
            OriginalState::Present {
                content: b"<project/>".to_vec(),
                sha256: hash_content(b"<project/>"),
            }
        );
        assert_eq!(backup.files[1].state, OriginalState::Absent);
        assert_eq!(backup.modified_count(), 1);
        assert!(backups.path().join(backup.file_name()).exists());
    }
}
