//! Backup and rollback

mod create;
mod restore;
mod types;

pub use create::{create_backup, BackupCreateError};
pub use restore::{load_backup, restore_from_backup, verify_backup_integrity, RestoreError};
pub use types::{Backup, BackupFile, OriginalState};
