//! API entry commands
//!
//! Handles: apikit api add/delete/list

use clap::Subcommand;
use serde_json::json;

use super::{report, Context, OutputArgs};

/// API entry commands
#[derive(Subcommand)]
pub enum ApiCommands {
    /// List configured APIs
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an API entry
    Add {
        /// API name, unique within the plugin configuration
        name: String,
        /// Fully qualified proxy class
        #[arg(long)]
        proxy_class: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Delete an API entry and all its settings
    Delete {
        /// API name
        name: String,
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Execute API command
pub fn execute(ctx: &Context, cmd: ApiCommands) -> Result<(), Box<dyn std::error::Error>> {
    let ops = ctx.plugin_ops();
    match cmd {
        ApiCommands::List { json } => {
            let apis = ops.list_apis()?;
            if json {
                let output = json!({
                    "count": apis.len(),
                    "apis": apis,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if apis.is_empty() {
                println!("No APIs configured.");
            } else {
                for api in &apis {
                    let proxy = api.proxy_class.as_deref().unwrap_or("-");
                    println!("  {} ({proxy})", api.api_name);
                }
            }
            Ok(())
        }
        ApiCommands::Add {
            name,
            proxy_class,
            output,
        } => {
            let result = ops.add_api(&name, &proxy_class, output.dry_run)?;
            report(&result, &output)
        }
        ApiCommands::Delete { name, output } => {
            let result = ops.delete_api(&name, output.dry_run)?;
            report(&result, &output)
        }
    }
}
