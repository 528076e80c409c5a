//! Change plan types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::text::generate_text_diff;

/// File operations a command will perform, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePlan {
    /// Project being modified
    pub project_root: PathBuf,
    /// Operations to perform
    pub operations: Vec<FileOperation>,
    /// Warnings generated
    pub warnings: Vec<Warning>,
}

impl ChangePlan {
    /// Create a new empty plan
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            operations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if there are any operations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Check if there are any errors
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w.severity, WarningSeverity::Error))
    }

    /// Plan a new file
    pub fn create(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.operations.push(FileOperation::Create {
            path: path.into(),
            content: content.into(),
        });
    }

    /// Plan a rewrite of an existing text file; identical content is skipped
    pub fn modify(&mut self, path: impl Into<PathBuf>, old: &str, new: &str) {
        if old == new {
            return;
        }
        let path = path.into();
        let label = path.display().to_string();
        self.operations.push(FileOperation::Modify {
            diff: generate_text_diff(old, new, &label),
            path,
            new_content: new.as_bytes().to_vec(),
        });
    }

    pub fn warn(&mut self, severity: WarningSeverity, message: impl Into<String>) {
        self.warnings.push(Warning {
            severity,
            message: message.into(),
        });
    }

    /// Absolute paths touched by the plan
    #[must_use]
    pub fn absolute_paths(&self) -> Vec<PathBuf> {
        self.operations
            .iter()
            .map(|op| self.project_root.join(op.path()))
            .collect()
    }

    /// Concatenated diffs of all modifications
    #[must_use]
    pub fn combined_diff(&self) -> String {
        self.operations
            .iter()
            .filter_map(|op| match op {
                FileOperation::Modify { diff, .. } => Some(diff.as_str()),
                FileOperation::Create { .. } => None,
            })
            .collect()
    }
}

/// A file operation in the change plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileOperation {
    /// Create a new file
    Create { path: PathBuf, content: Vec<u8> },
    /// Modify an existing file
    Modify {
        path: PathBuf,
        diff: String,
        new_content: Vec<u8>,
    },
}

impl FileOperation {
    /// Get the path affected by this operation
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Create { path, .. } | Self::Modify { path, .. } => path,
        }
    }
}

/// A warning or error in the change plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    /// Severity level
    pub severity: WarningSeverity,
    /// Warning message
    pub message: String,
}

/// Warning severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    /// Informational
    Info,
    /// Warning (proceed with caution)
    Warning,
    /// Error (should not proceed)
    Error,
}
