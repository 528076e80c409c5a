//! Maven project helpers over a loaded `pom.xml`

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::coordinate::Coordinate;
use super::document::PomDocument;
use super::element::Element;
use crate::config::{ConfigError, ConfigResult};

/// Build descriptor file name
pub const POM_FILE: &str = "pom.xml";

fn property_ref() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("Invalid property regex"))
}

/// A project directory and its parsed `pom.xml`
#[derive(Debug, Clone)]
pub struct MavenProject {
    root_dir: PathBuf,
    document: PomDocument,
}

impl MavenProject {
    /// Load `<dir>/pom.xml`
    ///
    /// # Errors
    /// Returns `PomNotFound` when the file is missing, or a parse error
    pub fn load(project_dir: &Path) -> ConfigResult<Self> {
        let pom = project_dir.join(POM_FILE);
        if !pom.exists() {
            return Err(ConfigError::PomNotFound {
                path: project_dir.to_path_buf(),
            });
        }
        Ok(Self {
            root_dir: project_dir.to_path_buf(),
            document: PomDocument::load(&pom)?,
        })
    }

    /// Wrap an already parsed document
    #[must_use]
    pub fn from_document(project_dir: &Path, document: PomDocument) -> Self {
        Self {
            root_dir: project_dir.to_path_buf(),
            document,
        }
    }

    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    #[must_use]
    pub fn pom_path(&self) -> PathBuf {
        self.root_dir.join(POM_FILE)
    }

    #[must_use]
    pub fn document(&self) -> &PomDocument {
        &self.document
    }

    /// The `<project>` element
    #[must_use]
    pub fn root(&self) -> &Element {
        self.document.root()
    }

    pub fn root_mut(&mut self) -> &mut Element {
        self.document.root_mut()
    }

    /// Set a top-level child such as `<name>` unless it already exists
    pub fn set_if_absent(&mut self, name: &str, value: &str) -> bool {
        if self.root().has_child(name) {
            return false;
        }
        self.root_mut().get_or_create_child_with_content(name, value);
        true
    }

    /// Look up a `<properties>` entry
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.root().child("properties")?.child_text(name)
    }

    /// Upsert a `<properties>` entry
    pub fn set_property(&mut self, name: &str, value: &str) {
        debug!(name, value, "setting property");
        self.root_mut()
            .get_or_create_child("properties")
            .get_or_create_child_with_content(name, value);
    }

    /// Replace `${name}` references with property values
    ///
    /// `project.groupId`, `project.artifactId` and `project.version` resolve
    /// from the project itself. Unknown references are left as written.
    #[must_use]
    pub fn resolve_properties(&self, value: &str) -> String {
        let mut known: HashMap<String, String> = HashMap::new();
        if let Some(properties) = self.root().child("properties") {
            for property in properties.children() {
                if let Some(text) = property.text() {
                    known.insert(property.name().to_string(), text.to_string());
                }
            }
        }
        for field in ["groupId", "artifactId", "version"] {
            if let Some(text) = self.root().child_text(field) {
                known.insert(format!("project.{field}"), text.to_string());
            }
        }

        property_ref()
            .replace_all(value, |caps: &regex::Captures<'_>| {
                known
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Direct dependencies
    #[must_use]
    pub fn dependencies(&self) -> Vec<Coordinate> {
        collect_coordinates(self.root().child("dependencies"), "dependency")
    }

    /// Entries of `<dependencyManagement><dependencies>`
    #[must_use]
    pub fn managed_dependencies(&self) -> Vec<Coordinate> {
        collect_coordinates(
            self.root()
                .child("dependencyManagement")
                .and_then(|m| m.child("dependencies")),
            "dependency",
        )
    }

    #[must_use]
    pub fn has_dependency(&self, coordinate: &Coordinate) -> bool {
        self.dependencies().iter().any(|d| d.same_artifact(coordinate))
    }

    /// Append a dependency unless one with the same artifact exists
    pub fn add_dependency_if_absent(&mut self, coordinate: &Coordinate) -> bool {
        if self.has_dependency(coordinate) {
            return false;
        }
        debug!(%coordinate, "adding dependency");
        self.root_mut()
            .get_or_create_child("dependencies")
            .append_child(coordinate.to_element("dependency"));
        true
    }

    /// Plugin declared in `<build><plugins>`
    #[must_use]
    pub fn find_plugin(&self, coordinate: &Coordinate) -> Option<&Element> {
        self.root()
            .child("build")?
            .child("plugins")?
            .children()
            .find(|p| is_artifact(p, "plugin", coordinate))
    }

    pub fn find_plugin_mut(&mut self, coordinate: &Coordinate) -> Option<&mut Element> {
        self.root_mut()
            .child_mut("build")?
            .child_mut("plugins")?
            .children_mut()
            .find(|p| is_artifact(p, "plugin", coordinate))
    }

    /// Plugin declared in `<build><pluginManagement><plugins>`
    #[must_use]
    pub fn find_managed_plugin(&self, coordinate: &Coordinate) -> Option<&Element> {
        self.root()
            .child("build")?
            .child("pluginManagement")?
            .child("plugins")?
            .children()
            .find(|p| is_artifact(p, "plugin", coordinate))
    }

    #[must_use]
    pub fn is_plugin_installed(&self, coordinate: &Coordinate) -> bool {
        self.find_plugin(coordinate).is_some()
    }

    /// Append a plugin to `<build><plugins>` unless the artifact is already there
    pub fn add_plugin_if_absent(&mut self, plugin: Element) -> bool {
        let Some(coordinate) = Coordinate::from_element(&plugin) else {
            return false;
        };
        if self.is_plugin_installed(&coordinate) {
            return false;
        }
        debug!(%coordinate, "adding plugin");
        self.root_mut()
            .get_or_create_child("build")
            .get_or_create_child("plugins")
            .append_child(plugin);
        true
    }

    /// Append a plugin to `<build><pluginManagement><plugins>` unless present
    pub fn add_managed_plugin_if_absent(&mut self, plugin: Element) -> bool {
        let Some(coordinate) = Coordinate::from_element(&plugin) else {
            return false;
        };
        if self.find_managed_plugin(&coordinate).is_some() {
            return false;
        }
        self.root_mut()
            .get_or_create_child("build")
            .get_or_create_child("pluginManagement")
            .get_or_create_child("plugins")
            .append_child(plugin);
        true
    }

    /// Configuration block of a plugin's first execution
    ///
    /// Falls back to the plugin-level `<configuration>` when the plugin
    /// declares no executions.
    #[must_use]
    pub fn plugin_configuration(&self, coordinate: &Coordinate) -> Option<&Element> {
        let plugin = self.find_plugin(coordinate)?;
        match plugin.child("executions").and_then(|e| e.child("execution")) {
            Some(execution) => execution.child("configuration"),
            None => plugin.child("configuration"),
        }
    }

    /// Mutable configuration block of a plugin's first execution, created if absent
    pub fn plugin_configuration_mut(&mut self, coordinate: &Coordinate) -> Option<&mut Element> {
        let plugin = self.find_plugin_mut(coordinate)?;
        let has_execution = plugin
            .child("executions")
            .is_some_and(|e| e.has_child("execution"));
        if has_execution {
            let execution = plugin.child_mut("executions")?.child_mut("execution")?;
            Some(execution.get_or_create_child("configuration"))
        } else {
            Some(plugin.get_or_create_child("configuration"))
        }
    }

    /// Serialize the current document
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_xml_string(&self) -> ConfigResult<String> {
        self.document.to_xml_string()
    }

    /// Write the document back to `pom.xml`
    ///
    /// # Errors
    /// Returns an error if the write fails
    pub fn save(&self) -> ConfigResult<()> {
        self.document.save(&self.pom_path())
    }
}

fn is_artifact(element: &Element, name: &str, coordinate: &Coordinate) -> bool {
    element.name() == name
        && Coordinate::from_element(element).is_some_and(|c| c.same_artifact(coordinate))
}

fn collect_coordinates(parent: Option<&Element>, name: &str) -> Vec<Coordinate> {
    parent
        .map(|p| {
            p.children_named(name)
                .filter_map(Coordinate::from_element)
                .collect()
        })
        .unwrap_or_default()
}
