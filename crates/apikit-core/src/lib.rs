//! apikit Core - Camel API component project configuration
//!
//! This crate edits the `camel-api-component-maven-plugin` configuration
//! of a Maven project, sets up new component projects, and provides
//! diff, backup and rollback for every change it writes.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod apply;
pub mod backup;
pub mod classes;
pub mod config;
pub mod diff;
pub mod pom;
pub mod settings;
pub mod setup;
pub mod util;
pub mod versions;

pub use backup::Backup;
pub use config::{ConfigError, ConfigResult, ConfigScope, OperationResult, PluginOps};
pub use diff::ChangePlan;
pub use pom::{MavenProject, PomDocument};
pub use settings::Settings;
pub use setup::ProjectSetup;
