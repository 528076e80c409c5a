//! Configuration scope handling
//!
//! Settings either apply to every API (global) or to one named API entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a configuration element lives
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "scope", content = "api")]
pub enum ConfigScope {
    /// Directly under the plugin configuration, applies to all APIs
    Global,
    /// Under the `api` entry with this `apiName`
    Api(String),
}

impl ConfigScope {
    /// Scope selected by an optional API name
    #[must_use]
    pub fn from_api(api_name: Option<&str>) -> Self {
        api_name.map_or(Self::Global, |name| Self::Api(name.to_string()))
    }

    #[must_use]
    pub fn api_name(&self) -> Option<&str> {
        match self {
            Self::Global => None,
            Self::Api(name) => Some(name),
        }
    }

    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }
}

impl From<Option<String>> for ConfigScope {
    fn from(api_name: Option<String>) -> Self {
        api_name.map_or(Self::Global, Self::Api)
    }
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Api(name) => write!(f, "api '{name}'"),
        }
    }
}
