//! API component configuration
//!
//! Edits the `camel-api-component-maven-plugin` configuration block:
//! - API entries (`apis/api`)
//! - Extra and nullable endpoint options
//! - Argument substitutions and method aliases
//! - Javadoc and signature file sources, with exclusion regexes
//!
//! Settings apply globally or to one API, selected by [`ConfigScope`].

pub mod apis;
mod error;
mod ops;
mod options;
mod pattern;
mod plugin_ops;
mod scope;

pub use apis::{complete_api_names, find_api_by_name, resolve_target_element};
pub use error::{ConfigError, ConfigResult};
pub use ops::{OperationResult, OperationType};
pub use options::{
    Alias, ExcludeTarget, ExtraOption, JavadocConfig, NullableOption, Substitution, ANY_METHOD,
};
pub use pattern::{has_balanced_parens, is_grouped, merge_regex};
pub use plugin_ops::{api_component_plugin, ApiSummary, PluginOps};
pub use scope::ConfigScope;

pub(crate) use options::require;
pub(crate) use plugin_ops::commit_plan;
