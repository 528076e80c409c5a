//! Maven artifact coordinates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::element::Element;
use crate::config::ConfigError;

/// `groupId:artifactId[:version[:scope]]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default = "default_packaging")]
    pub packaging: String,
}

fn default_packaging() -> String {
    "jar".to_string()
}

impl Coordinate {
    #[must_use]
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            scope: None,
            packaging: default_packaging(),
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Whether `groupId` and `artifactId` match, ignoring version and scope
    #[must_use]
    pub fn same_artifact(&self, other: &Coordinate) -> bool {
        self.group_id == other.group_id && self.artifact_id == other.artifact_id
    }

    /// Read the coordinate of a `<dependency>` or `<plugin>` element
    ///
    /// Plugins without a `groupId` default to `org.apache.maven.plugins`.
    #[must_use]
    pub fn from_element(element: &Element) -> Option<Self> {
        let artifact_id = element.child_text("artifactId")?;
        let group_id = element.child_text("groupId").unwrap_or_else(|| {
            if element.name() == "plugin" {
                "org.apache.maven.plugins"
            } else {
                ""
            }
        });
        Some(Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: element.child_text("version").map(String::from),
            scope: element.child_text("scope").map(String::from),
            packaging: element
                .child_text("type")
                .map_or_else(default_packaging, String::from),
        })
    }

    /// Build an element named `name` (`dependency`, `plugin`, ...) holding this coordinate
    #[must_use]
    pub fn to_element(&self, name: &str) -> Element {
        let mut element = Element::new(name);
        element.get_or_create_child_with_content("groupId", self.group_id.as_str());
        element.get_or_create_child_with_content("artifactId", self.artifact_id.as_str());
        element.get_or_create_child_if_some("version", self.version.as_deref());
        element.get_or_create_child_if_some("scope", self.scope.as_deref());
        element
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if let Some(version) = &self.version {
            write!(f, ":{version}")?;
            if let Some(scope) = &self.scope {
                write!(f, ":{scope}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Coordinate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 2 || parts.len() > 4 || parts.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid coordinate '{s}', expected groupId:artifactId[:version[:scope]]"
            )));
        }
        let mut coordinate = Self::new(parts[0], parts[1]);
        if let Some(version) = parts.get(2) {
            coordinate = coordinate.with_version(*version);
        }
        if let Some(scope) = parts.get(3) {
            coordinate = coordinate.with_scope(*scope);
        }
        Ok(coordinate)
    }
}
