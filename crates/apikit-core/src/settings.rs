//! Tool settings
//!
//! Read from `<project>/apikit.toml`, else `~/.apikit/config.toml`, else
//! built-in defaults. Every field is optional in the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{ConfigError, ConfigResult};

/// Project-level settings file name
pub const PROJECT_SETTINGS_FILE: &str = "apikit.toml";

fn apikit_home() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".apikit")
}

/// Settings for project setup, completion and backups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Local Maven repository
    pub local_repository: PathBuf,
    /// Where backups are written
    pub backup_dir: PathBuf,
    /// Back up files before each write
    pub backups: bool,
    pub versions: VersionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_default();
        Self {
            local_repository: home.join(".m2").join("repository"),
            backup_dir: apikit_home().join("backups"),
            backups: true,
            versions: VersionSettings::default(),
        }
    }
}

/// Versions written by project setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionSettings {
    /// Camel version; resolved from the local repository when unset
    pub camel: Option<String>,
    pub slf4j: String,
    pub log4j: String,
    /// Java source/target level
    pub java: String,
    pub compiler_plugin: String,
    pub resources_plugin: String,
    pub bundle_plugin: String,
    pub build_helper_plugin: String,
}

impl Default for VersionSettings {
    fn default() -> Self {
        Self {
            camel: None,
            slf4j: "1.7.21".into(),
            log4j: "1.2.17".into(),
            java: "1.7".into(),
            compiler_plugin: "3.5.1".into(),
            resources_plugin: "2.6".into(),
            bundle_plugin: "2.3.7".into(),
            build_helper_plugin: "1.10".into(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    ///
    /// # Errors
    /// Returns an error for invalid TOML
    pub fn parse(content: &str, origin: &Path) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::SettingsError {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read a specific settings file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::from(e).at(path))?;
        debug!(path = %path.display(), "loaded settings");
        Self::parse(&content, path)
    }

    /// Resolve settings for a project directory
    ///
    /// # Errors
    /// Returns an error if a settings file exists but is invalid
    pub fn load(project_dir: &Path) -> ConfigResult<Self> {
        let project_file = project_dir.join(PROJECT_SETTINGS_FILE);
        if project_file.exists() {
            return Self::load_file(&project_file);
        }
        let user_file = apikit_home().join("config.toml");
        if user_file.exists() {
            return Self::load_file(&user_file);
        }
        Ok(Self::default())
    }

    /// Backup directory when backups are enabled
    #[must_use]
    pub fn backup_dir(&self) -> Option<PathBuf> {
        self.backups.then(|| self.backup_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::parse(
            r#"
backups = false
local_repository = "/opt/m2"

[versions]
camel = "2.18.1"
"#,
            Path::new("apikit.toml"),
        )
        .unwrap();

        assert_eq!(settings.local_repository, PathBuf::from("/opt/m2"));
        assert!(settings.backup_dir().is_none());
        assert_eq!(settings.versions.camel.as_deref(), Some("2.18.1"));
        assert_eq!(settings.versions.slf4j, "1.7.21");
    }

    #[test]
    fn test_invalid_toml() {
        let result = Settings::parse("backups = [", Path::new("apikit.toml"));
        assert!(matches!(result, Err(ConfigError::SettingsError { .. })));
    }

    #[test]
    fn test_project_file_wins() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_SETTINGS_FILE), "[versions]\njava = \"1.8\"\n").unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.versions.java, "1.8");
    }
}
