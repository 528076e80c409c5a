//! Backup records for rollback

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Pre-command state of every file one command touched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    /// Also the stem of `<backup_dir>/<id>.json`
    pub id: Uuid,
    pub project_path: PathBuf,
    /// Command title, e.g. `Api Component: Add Api`
    pub description: Option<String>,
    pub files: Vec<BackupFile>,
    pub created_at: DateTime<Utc>,
}

impl Backup {
    #[must_use]
    pub fn new(project_path: PathBuf, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_path,
            description: Some(description.into()),
            files: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Remember `path` with its current bytes
    pub fn record_present(&mut self, path: PathBuf, content: Vec<u8>, sha256: String) {
        self.files.push(BackupFile {
            path,
            state: OriginalState::Present { content, sha256 },
        });
    }

    /// Remember that `path` did not exist yet
    pub fn record_absent(&mut self, path: PathBuf) {
        self.files.push(BackupFile {
            path,
            state: OriginalState::Absent,
        });
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.id)
    }

    /// Files that rollback writes back rather than deletes
    #[must_use]
    pub fn modified_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.state, OriginalState::Present { .. }))
            .count()
    }
}

/// One project file, path relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupFile {
    pub path: PathBuf,
    #[serde(flatten)]
    pub state: OriginalState,
}

/// What a file looked like before the command ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OriginalState {
    /// Created by the command; rollback deletes it
    Absent,
    /// Modified by the command; rollback writes these bytes back
    Present { content: Vec<u8>, sha256: String },
}
