//! CLI command handlers
//!
//! Each command group has its own module. Mutating commands share
//! [`OutputArgs`] and print their result through [`report`].

pub mod api;
pub mod complete;
pub mod exclude;
pub mod javadoc;
pub mod option;
pub mod rollback;
pub mod setup;

use clap::builder::NonEmptyStringValueParser;
use clap::Args;
use serde_json::json;
use std::path::{Path, PathBuf};

use apikit_core::config::{ConfigScope, OperationResult, PluginOps};
use apikit_core::settings::Settings;

/// Project directory and settings resolved from global flags
pub struct Context {
    pub project: PathBuf,
    pub settings: Settings,
}

impl Context {
    /// Resolve the project directory and load settings
    pub fn new(
        project: Option<PathBuf>,
        config: Option<&Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let project = match project {
            Some(path) => path,
            None => std::env::current_dir()?,
        };
        let settings = match config {
            Some(path) => Settings::load_file(path)?,
            None => Settings::load(&project)?,
        };
        Ok(Self { project, settings })
    }

    /// Plugin operations with backups as configured
    pub fn plugin_ops(&self) -> PluginOps {
        let ops = PluginOps::new(self.project.clone());
        match self.settings.backup_dir() {
            Some(dir) => ops.with_backup_dir(dir),
            None => ops,
        }
    }
}

/// Output flags shared by every mutating command
#[derive(Args)]
pub struct OutputArgs {
    /// Preview changes without applying
    #[arg(long)]
    pub dry_run: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// `--api` selector; the setting is global when omitted
#[derive(Args)]
pub struct ScopeArgs {
    /// API name (global when omitted)
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub api: Option<String>,
}

impl ScopeArgs {
    pub fn scope(&self) -> ConfigScope {
        ConfigScope::from_api(self.api.as_deref())
    }
}

/// Print an operation result as text or JSON
pub fn report(
    result: &OperationResult,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if output.json {
        let value = json!({
            "success": result.success,
            "operation": result.operation,
            "message": result.message,
            "scope": result.scope.as_ref().map(ToString::to_string),
            "dry_run": output.dry_run,
            "files_modified": result
                .files_modified
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
            "backup_id": result.backup_id,
            "diff": result.diff,
            "warnings": result.warnings,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for warning in &result.warnings {
        eprintln!("Warning: {warning}");
    }

    if output.dry_run {
        match result.diff.as_deref() {
            Some(diff) if !diff.is_empty() => println!("{diff}"),
            _ => println!("No changes needed."),
        }
        println!("Dry run - no changes made.");
        return Ok(());
    }

    println!("{}", result.message);
    if let Some(backup_id) = &result.backup_id {
        println!("Backup created: {backup_id}");
    }
    Ok(())
}
