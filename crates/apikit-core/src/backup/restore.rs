//! Rollback restore functionality

use crate::backup::create::hash_content;
use crate::backup::{Backup, OriginalState};
use crate::util::{safe_join, validate_name, PathError};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Why a rollback could not run
#[derive(Error, Debug)]
pub enum RestoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No backup with id {0}")]
    BackupNotFound(String),

    #[error("Unreadable backup {0}: {1}")]
    InvalidBackup(String, String),

    #[error("Backup content for {0} does not match its hash (expected {1}, got {2})")]
    HashMismatch(String, String, String),

    #[error("Unsafe backup path: {0}")]
    PathSecurity(#[from] PathError),
}

/// Put every recorded file back the way it was before the command
///
/// All hashes are checked before the first write, so a damaged backup
/// leaves the project untouched.
///
/// # Errors
/// Returns an error on a hash mismatch, an unsafe path or an I/O failure
pub fn restore_from_backup(backup: &Backup) -> Result<(), RestoreError> {
    verify_backup_integrity(backup)?;
    let root = backup.project_path.as_path();

    for file in &backup.files {
        let target = safe_join(root, &file.path)?;
        match &file.state {
            OriginalState::Present { content, .. } => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&target, content)?;
                debug!(path = %file.path.display(), "restored");
            }
            OriginalState::Absent if target.exists() => {
                fs::remove_file(&target)?;
                if let Some(parent) = target.parent() {
                    prune_empty_dirs(parent, root)?;
                }
                debug!(path = %file.path.display(), "removed");
            }
            OriginalState::Absent => {}
        }
    }

    info!(id = %backup.id, files = backup.files.len(), "rollback complete");
    Ok(())
}

/// Read `<backup_dir>/<id>.json`
///
/// # Errors
/// Returns an error if the id is not a plain name, or the file is missing or malformed
pub fn load_backup(backup_dir: &Path, id: &str) -> Result<Backup, RestoreError> {
    validate_name(id)?;
    let path = backup_dir.join(format!("{id}.json"));
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RestoreError::BackupNotFound(id.to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&content)
        .map_err(|e| RestoreError::InvalidBackup(id.to_string(), e.to_string()))
}

/// Check every saved file against its recorded SHA-256
///
/// # Errors
/// Returns `HashMismatch` for the first file whose bytes changed
pub fn verify_backup_integrity(backup: &Backup) -> Result<(), RestoreError> {
    for file in &backup.files {
        let OriginalState::Present { content, sha256 } = &file.state else {
            continue;
        };
        let actual = hash_content(content);
        if &actual != sha256 {
            return Err(RestoreError::HashMismatch(
                file.path.display().to_string(),
                sha256.clone(),
                actual,
            ));
        }
    }
    Ok(())
}

/// Remove `dir` and its ancestors while empty, stopping at `root`
fn prune_empty_dirs(dir: &Path, root: &Path) -> Result<(), std::io::Error> {
    for current in dir.ancestors() {
        if current == root || !current.starts_with(root) {
            break;
        }
        if fs::read_dir(current)?.next().is_some() {
            break;
        }
        fs::remove_dir(current)?;
    }
    Ok(())
}
