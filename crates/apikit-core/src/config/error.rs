//! Error types for plugin configuration operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while editing the API component configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An API with this name already exists
    #[error("Duplicate API name {name}")]
    DuplicateApi { name: String },

    /// Delete target does not exist
    #[error("No API found with name {name}")]
    ApiNotFound { name: String },

    /// A per-API setting was requested for an API that does not exist
    #[error("Missing API name {name}")]
    MissingApi { name: String },

    /// The API component plugin is not configured in the project
    #[error("Camel API component plugin is not configured in {}", path.display())]
    PluginNotFound { path: PathBuf },

    /// The project has no build descriptor
    #[error("No pom.xml found in {}", path.display())]
    PomNotFound { path: PathBuf },

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// File I/O error
    #[error("I/O error for {}: {message}", path.display())]
    IoError { path: PathBuf, message: String },

    /// XML parse or write error
    #[error("XML error in {}: {message}", path.display())]
    XmlError { path: PathBuf, message: String },

    /// Settings file could not be read
    #[error("Settings error in {}: {message}", path.display())]
    SettingsError { path: PathBuf, message: String },

    /// Template rendering failed
    #[error("Template error for {name}: {message}")]
    TemplateError { name: String, message: String },

    /// Backup creation failed
    #[error("Failed to create backup: {0}")]
    BackupFailed(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConfigError {
    /// Get the error code for CLI/JSON responses
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateApi { .. } => "DUPLICATE_API",
            Self::ApiNotFound { .. } => "API_NOT_FOUND",
            Self::MissingApi { .. } => "MISSING_API",
            Self::PluginNotFound { .. } => "PLUGIN_NOT_FOUND",
            Self::PomNotFound { .. } => "POM_NOT_FOUND",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::IoError { .. } => "IO_ERROR",
            Self::XmlError { .. } | Self::SettingsError { .. } => "PARSE_ERROR",
            Self::TemplateError { .. } => "TEMPLATE_ERROR",
            Self::BackupFailed(_) => "BACKUP_FAILED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Attach a file path to path-less I/O and XML errors
    #[must_use]
    pub fn at(self, path: &std::path::Path) -> Self {
        match self {
            Self::IoError { path: p, message } if p.as_os_str().is_empty() => Self::IoError {
                path: path.to_path_buf(),
                message,
            },
            Self::XmlError { path: p, message } if p.as_os_str().is_empty() => Self::XmlError {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for ConfigError {
    fn from(err: quick_xml::Error) -> Self {
        Self::XmlError {
            path: PathBuf::new(),
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for ConfigError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::XmlError {
            path: PathBuf::new(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_command_output() {
        let err = ConfigError::DuplicateApi {
            name: "testApi".into(),
        };
        assert_eq!(err.to_string(), "Duplicate API name testApi");

        let err = ConfigError::ApiNotFound {
            name: "testApi".into(),
        };
        assert_eq!(err.to_string(), "No API found with name testApi");

        let err = ConfigError::MissingApi {
            name: "testApi".into(),
        };
        assert_eq!(err.to_string(), "Missing API name testApi");
    }

    #[test]
    fn test_at_attaches_path_once() {
        let err = ConfigError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = err.at(std::path::Path::new("pom.xml"));
        assert!(err.to_string().contains("pom.xml"));
        assert_eq!(err.code(), "IO_ERROR");
    }
}
