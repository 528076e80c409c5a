//! Values written into the plugin configuration
//!
//! Each type knows the container element it belongs in and how to write
//! itself into that container.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::ops::OperationType;
use super::pattern::merge_regex;
use crate::pom::Element;

/// Default method pattern for substitutions
pub const ANY_METHOD: &str = "^.+$";

pub(crate) fn require(field: &str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

/// Extra endpoint URI option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraOption {
    pub name: String,
    /// Java type, generics allowed
    #[serde(rename = "type")]
    pub type_name: String,
}

impl ExtraOption {
    pub const CONTAINER: &'static str = "extraOptions";

    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// # Errors
    /// Returns an error if name or type is empty
    pub fn validate(&self) -> ConfigResult<()> {
        require("Extra option name", &self.name)?;
        require("Extra option type", &self.type_name)
    }

    /// Append `extraOption{type,name}`; generic types become CDATA
    pub fn write_to(&self, container: &mut Element) {
        let option = container.create_child("extraOption");
        let type_element = option.create_child("type");
        if self.type_name.contains('<') {
            type_element.set_cdata(self.type_name.as_str());
        } else {
            type_element.set_text(self.type_name.as_str());
        }
        option.create_child("name").set_text(self.name.as_str());
    }
}

/// Nullable endpoint URI option name
pub struct NullableOption;

impl NullableOption {
    pub const CONTAINER: &'static str = "nullableOptions";
    pub const ELEMENT: &'static str = "nullableOption";

    /// Append the option unless the same name is already listed
    ///
    /// Returns whether the container changed.
    pub fn write_to(option: &str, container: &mut Element) -> bool {
        if container
            .children_named(Self::ELEMENT)
            .any(|e| e.text() == Some(option))
        {
            return false;
        }
        container.create_child(Self::ELEMENT).set_text(option);
        true
    }
}

/// Argument name substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substitution {
    pub method: String,
    pub arg_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg_type: Option<String>,
    pub replacement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_with_type: Option<bool>,
}

impl Substitution {
    pub const CONTAINER: &'static str = "substitutions";

    /// Substitution matching every method
    #[must_use]
    pub fn new(arg_name: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            method: ANY_METHOD.to_string(),
            arg_name: arg_name.into(),
            arg_type: None,
            replacement: replacement.into(),
            replace_with_type: None,
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// # Errors
    /// Returns an error if a required field is empty
    pub fn validate(&self) -> ConfigResult<()> {
        require("Method regex", &self.method)?;
        require("Argument name regex", &self.arg_name)?;
        require("Replacement expression", &self.replacement)
    }

    pub fn write_to(&self, container: &mut Element) {
        let substitution = container.create_child("substitution");
        substitution.get_or_create_child_with_content("method", self.method.as_str());
        substitution.get_or_create_child_with_content("argName", self.arg_name.as_str());
        substitution.get_or_create_child_if_some("argType", self.arg_type.as_deref());
        substitution.get_or_create_child_with_content("replacement", self.replacement.as_str());
        substitution.get_or_create_child_if_some("replaceWithType", self.replace_with_type);
    }
}

/// Method alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alias {
    pub method_pattern: String,
    pub method_alias: String,
}

impl Alias {
    pub const CONTAINER: &'static str = "aliases";

    #[must_use]
    pub fn new(method_pattern: impl Into<String>, method_alias: impl Into<String>) -> Self {
        Self {
            method_pattern: method_pattern.into(),
            method_alias: method_alias.into(),
        }
    }

    /// # Errors
    /// Returns an error if either field is empty
    pub fn validate(&self) -> ConfigResult<()> {
        require("Method pattern", &self.method_pattern)?;
        require("Method alias", &self.method_alias)
    }

    pub fn write_to(&self, container: &mut Element) {
        let alias = container.create_child("alias");
        alias.get_or_create_child_with_content("methodPattern", self.method_pattern.as_str());
        alias.get_or_create_child_with_content("methodAlias", self.method_alias.as_str());
    }
}

/// `fromJavadoc` settings; absent fields leave existing values alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavadocConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_packages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_classes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_methods: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_static_methods: Option<bool>,
}

impl JavadocConfig {
    pub const CONTAINER: &'static str = "fromJavadoc";

    pub fn write_to(&self, container: &mut Element) {
        container.get_or_create_child_if_some("excludePackages", self.exclude_packages.as_deref());
        container.get_or_create_child_if_some("excludeClasses", self.exclude_classes.as_deref());
        container.get_or_create_child_if_some("excludeMethods", self.exclude_methods.as_deref());
        container.get_or_create_child_if_some("includeStaticMethods", self.include_static_methods);
    }

    /// Set `includeStaticMethods`, overwriting any previous value
    pub fn write_static_methods(include: bool, container: &mut Element) {
        container.get_or_create_child_with_content("includeStaticMethods", include.to_string());
    }
}

/// Which exclusion regex an exclude command edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExcludeTarget {
    JavadocPackages,
    JavadocClasses,
    JavadocMethods,
    ConfigNames,
    ConfigTypes,
}

impl ExcludeTarget {
    /// Element resolved against the scope
    #[must_use]
    pub fn container(&self) -> &'static str {
        match self {
            Self::JavadocPackages | Self::JavadocClasses | Self::JavadocMethods => {
                JavadocConfig::CONTAINER
            }
            Self::ConfigNames => "excludeConfigNames",
            Self::ConfigTypes => "excludeConfigTypes",
        }
    }

    /// Child of the container holding the regex, if not the container itself
    #[must_use]
    pub fn child(&self) -> Option<&'static str> {
        match self {
            Self::JavadocPackages => Some("excludePackages"),
            Self::JavadocClasses => Some("excludeClasses"),
            Self::JavadocMethods => Some("excludeMethods"),
            Self::ConfigNames | Self::ConfigTypes => None,
        }
    }

    #[must_use]
    pub fn operation(&self) -> OperationType {
        match self {
            Self::JavadocPackages => OperationType::ExcludeJavadocPackages,
            Self::JavadocClasses => OperationType::ExcludeJavadocClasses,
            Self::JavadocMethods => OperationType::ExcludeJavadocMethods,
            Self::ConfigNames => OperationType::ExcludeConfigNames,
            Self::ConfigTypes => OperationType::ExcludeConfigTypes,
        }
    }

    /// Merge `regex` into the target element below `container`
    pub fn write_to(&self, regex: &str, append: bool, container: &mut Element) {
        let element = match self.child() {
            Some(child) => container.get_or_create_child(child),
            None => container,
        };
        let merged = merge_regex(element.text(), regex, append);
        element.set_text(merged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_option_generic_type_is_cdata() {
        let mut container = Element::new(ExtraOption::CONTAINER);
        ExtraOption::new("names", "java.util.List<String>").write_to(&mut container);
        ExtraOption::new("count", "int").write_to(&mut container);

        let options: Vec<_> = container.children_named("extraOption").collect();
        assert_eq!(options.len(), 2);
        let generic = options[0].child("type").unwrap();
        assert!(generic.is_cdata());
        assert_eq!(generic.text(), Some("java.util.List<String>"));
        assert!(!options[1].child("type").unwrap().is_cdata());
        assert_eq!(options[1].child_text("name"), Some("count"));
    }

    #[test]
    fn test_nullable_option_skips_duplicates() {
        let mut container = Element::new(NullableOption::CONTAINER);
        assert!(NullableOption::write_to("from", &mut container));
        assert!(NullableOption::write_to("to", &mut container));
        assert!(!NullableOption::write_to("from", &mut container));

        assert_eq!(container.children_named(NullableOption::ELEMENT).count(), 2);
    }

    #[test]
    fn test_substitution_optional_fields() {
        let mut container = Element::new(Substitution::CONTAINER);
        Substitution::new("^id$", "$1Id").write_to(&mut container);

        let substitution = container.child("substitution").unwrap();
        assert_eq!(substitution.child_text("method"), Some(ANY_METHOD));
        assert!(!substitution.has_child("argType"));
        assert!(!substitution.has_child("replaceWithType"));

        let mut full = Substitution::new("^id$", "$1Id").with_method("^get.+$");
        full.arg_type = Some("java.lang.String".into());
        full.replace_with_type = Some(true);
        full.write_to(&mut container);
        let second = container.children_named("substitution").nth(1).unwrap();
        assert_eq!(second.child_text("replaceWithType"), Some("true"));
        assert_eq!(second.child_text("method"), Some("^get.+$"));
    }

    #[test]
    fn test_javadoc_config_preserves_absent_fields() {
        let mut container = Element::new(JavadocConfig::CONTAINER);
        container.get_or_create_child_with_content("excludeClasses", "Old");

        let config = JavadocConfig {
            exclude_methods: Some("^close$".into()),
            ..JavadocConfig::default()
        };
        config.write_to(&mut container);

        assert_eq!(container.child_text("excludeClasses"), Some("Old"));
        assert_eq!(container.child_text("excludeMethods"), Some("^close$"));
        assert!(!container.has_child("excludePackages"));
    }

    #[test]
    fn test_exclude_target_merges() {
        let mut from_javadoc = Element::new("fromJavadoc");
        ExcludeTarget::JavadocMethods.write_to("foo", true, &mut from_javadoc);
        ExcludeTarget::JavadocMethods.write_to("bar", true, &mut from_javadoc);
        assert_eq!(from_javadoc.child_text("excludeMethods"), Some("(foo)|(bar)"));

        let mut names = Element::new("excludeConfigNames");
        ExcludeTarget::ConfigNames.write_to("foo", true, &mut names);
        ExcludeTarget::ConfigNames.write_to("bar", false, &mut names);
        assert_eq!(names.text(), Some("bar"));
    }

    #[test]
    fn test_validation() {
        assert!(ExtraOption::new("", "int").validate().is_err());
        assert!(Alias::new("^get(.+)$", "$1").validate().is_ok());
        assert!(Substitution::new(" ", "x").validate().is_err());
    }
}
