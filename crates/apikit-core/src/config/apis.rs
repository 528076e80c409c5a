//! API entries and scoped element resolution
//!
//! The plugin configuration holds an `apis` list of `api` entries keyed by
//! their `apiName` child. Per-API settings live inside the matching entry;
//! global settings live directly under the configuration.

use tracing::debug;

use super::error::{ConfigError, ConfigResult};
use super::scope::ConfigScope;
use crate::pom::Element;

pub const APIS: &str = "apis";
pub const API: &str = "api";
pub const API_NAME: &str = "apiName";
pub const PROXY_CLASS: &str = "proxyClass";

/// `api` entries in document order
pub fn api_elements(configuration: &Element) -> impl Iterator<Item = &Element> {
    configuration
        .child(APIS)
        .into_iter()
        .flat_map(|apis| apis.children_named(API))
}

/// First `api` whose `apiName` equals `name` exactly
#[must_use]
pub fn find_api_by_name<'a>(apis: &'a Element, name: &str) -> Option<&'a Element> {
    apis.children_named(API)
        .find(|api| api.child_text(API_NAME) == Some(name))
}

pub fn find_api_by_name_mut<'a>(apis: &'a mut Element, name: &str) -> Option<&'a mut Element> {
    apis.children_mut()
        .find(|api| api.name() == API && api.child_text(API_NAME) == Some(name))
}

/// Names of all configured APIs
#[must_use]
pub fn api_names(configuration: &Element) -> Vec<String> {
    api_elements(configuration)
        .filter_map(|api| api.child_text(API_NAME))
        .map(String::from)
        .collect()
}

/// API names starting with `prefix`, for shell completion
#[must_use]
pub fn complete_api_names(configuration: &Element, prefix: &str) -> Vec<String> {
    api_names(configuration)
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .collect()
}

/// Find or create the `config_name` element for a scope
///
/// Global scope always resolves. An API scope whose entry does not exist
/// fails with `MissingApi` before anything is created.
///
/// # Errors
/// Returns `MissingApi` for an unknown API name
pub fn resolve_target_element<'a>(
    configuration: &'a mut Element,
    config_name: &str,
    scope: &ConfigScope,
) -> ConfigResult<&'a mut Element> {
    match scope {
        ConfigScope::Global => Ok(configuration.get_or_create_child(config_name)),
        ConfigScope::Api(name) => {
            let api = configuration
                .child_mut(APIS)
                .and_then(|apis| find_api_by_name_mut(apis, name))
                .ok_or_else(|| ConfigError::MissingApi { name: name.clone() })?;
            Ok(api.get_or_create_child(config_name))
        }
    }
}

/// Append a new `api{apiName, proxyClass}` entry
///
/// # Errors
/// Returns `DuplicateApi` if the name is already taken
pub fn add_api(configuration: &mut Element, name: &str, proxy_class: &str) -> ConfigResult<()> {
    if configuration
        .child(APIS)
        .and_then(|apis| find_api_by_name(apis, name))
        .is_some()
    {
        return Err(ConfigError::DuplicateApi {
            name: name.to_string(),
        });
    }

    debug!(api = name, proxy_class, "adding api");
    let api = configuration.get_or_create_child(APIS).create_child(API);
    api.get_or_create_child_with_content(API_NAME, name);
    api.get_or_create_child_with_content(PROXY_CLASS, proxy_class);
    Ok(())
}

/// Remove the first `api` entry named `name` with its whole subtree
///
/// # Errors
/// Returns `ApiNotFound` if no entry matches
pub fn delete_api(configuration: &mut Element, name: &str) -> ConfigResult<Element> {
    let not_found = || ConfigError::ApiNotFound {
        name: name.to_string(),
    };
    let removed = configuration
        .child_mut(APIS)
        .ok_or_else(not_found)?
        .remove_child_where(|api| api.name() == API && api.child_text(API_NAME) == Some(name))
        .ok_or_else(not_found)?;
    debug!(api = name, "deleted api");
    Ok(removed)
}
