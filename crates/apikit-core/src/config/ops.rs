//! Operation kinds and results

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::scope::ConfigScope;

/// Operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationType {
    AddApi,
    DeleteApi,
    AddExtraOption,
    AddNullableOption,
    AddSubstitution,
    AddAlias,
    AddFromJavadoc,
    IncludeStaticMethods,
    ExcludeJavadocPackages,
    ExcludeJavadocClasses,
    ExcludeJavadocMethods,
    ExcludeConfigNames,
    ExcludeConfigTypes,
    AddFromSignatureFile,
    Setup,
    Rollback,
}

impl OperationType {
    /// Command title shown in result messages
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::AddApi => "Api Component: Add Api",
            Self::DeleteApi => "Api Component: Delete Api",
            Self::AddExtraOption => "Api Component: Add Extra Option",
            Self::AddNullableOption => "Api Component: Add Nullable Option",
            Self::AddSubstitution => "Api Component: Add Substitution",
            Self::AddAlias => "Api Component: Add Alias",
            Self::AddFromJavadoc => "Api Component: Add Config to Generate From Javadoc",
            Self::IncludeStaticMethods => "Api Component: Include Javadoc Static Methods",
            Self::ExcludeJavadocPackages => "Api Component: Exclude Javadoc Packages",
            Self::ExcludeJavadocClasses => "Api Component: Exclude Javadoc Classes",
            Self::ExcludeJavadocMethods => "Api Component: Exclude Javadoc Methods",
            Self::ExcludeConfigNames => "Api Component: Exclude Config Names",
            Self::ExcludeConfigTypes => "Api Component: Exclude Config Types",
            Self::AddFromSignatureFile => "Api Component: Add Config to Generate From Signature File",
            Self::Setup => "Api Component: Setup",
            Self::Rollback => "Api Component: Rollback",
        }
    }

    /// `Command '<title>' successfully executed!`
    #[must_use]
    pub fn success_message(&self) -> String {
        format!("Command '{}' successfully executed!", self.title())
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Result of an executed operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,

    /// Operation that was performed
    pub operation: OperationType,

    /// Human-readable outcome
    pub message: String,

    /// Scope affected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<ConfigScope>,

    /// Files that were (or, for a dry run, would be) written
    pub files_modified: Vec<PathBuf>,

    /// Backup ID (for rollback)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_id: Option<String>,

    /// Unified diff of the change, filled for dry runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,

    /// Warnings (non-fatal issues)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl OperationResult {
    /// Create a success result with the standard message
    pub fn success(
        operation: OperationType,
        files: Vec<PathBuf>,
        backup_id: Option<String>,
    ) -> Self {
        Self {
            success: true,
            operation,
            message: operation.success_message(),
            scope: None,
            files_modified: files,
            backup_id,
            diff: None,
            warnings: Vec::new(),
        }
    }

    /// Create a dry-run result carrying the diff
    pub fn dry_run(operation: OperationType, files: Vec<PathBuf>, diff: String) -> Self {
        Self {
            diff: Some(diff),
            ..Self::success(operation, files, None)
        }
    }

    /// Replace the message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: ConfigScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Add a warning
    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_message() {
        assert_eq!(
            OperationType::AddApi.success_message(),
            "Command 'Api Component: Add Api' successfully executed!"
        );
        assert_eq!(
            OperationType::AddFromSignatureFile.success_message(),
            "Command 'Api Component: Add Config to Generate From Signature File' successfully executed!"
        );
    }

    #[test]
    fn test_operation_result_success() {
        let result = OperationResult::success(
            OperationType::AddApi,
            vec![PathBuf::from("pom.xml")],
            Some("backup-123".into()),
        );
        assert!(result.success);
        assert_eq!(result.backup_id, Some("backup-123".into()));
        assert!(result.diff.is_none());
    }

    #[test]
    fn test_operation_result_dry_run() {
        let result = OperationResult::dry_run(
            OperationType::DeleteApi,
            vec![PathBuf::from("pom.xml")],
            "-<api/>\n".into(),
        )
        .with_scope(ConfigScope::Global);
        assert!(result.backup_id.is_none());
        assert_eq!(result.diff.as_deref(), Some("-<api/>\n"));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["operation"], "delete-api");
    }
}
