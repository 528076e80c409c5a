//! Javadoc generation commands
//!
//! Handles: apikit javadoc config/static-methods

use clap::Subcommand;

use apikit_core::config::JavadocConfig;

use super::{report, Context, OutputArgs, ScopeArgs};

/// Javadoc commands
#[derive(Subcommand)]
pub enum JavadocCommands {
    /// Generate from Javadoc, updating only the given fields
    Config {
        /// Package exclusion regex
        #[arg(long)]
        exclude_packages: Option<String>,
        /// Class exclusion regex
        #[arg(long)]
        exclude_classes: Option<String>,
        /// Method exclusion regex
        #[arg(long)]
        exclude_methods: Option<String>,
        /// Include static methods
        #[arg(long)]
        include_static_methods: Option<bool>,
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Include or skip static methods
    StaticMethods {
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        include: bool,
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Execute Javadoc command
pub fn execute(ctx: &Context, cmd: JavadocCommands) -> Result<(), Box<dyn std::error::Error>> {
    let ops = ctx.plugin_ops();
    match cmd {
        JavadocCommands::Config {
            exclude_packages,
            exclude_classes,
            exclude_methods,
            include_static_methods,
            scope,
            output,
        } => {
            let config = JavadocConfig {
                exclude_packages,
                exclude_classes,
                exclude_methods,
                include_static_methods,
            };
            let result = ops.add_from_javadoc(&scope.scope(), &config, output.dry_run)?;
            report(&result, &output)
        }
        JavadocCommands::StaticMethods {
            include,
            scope,
            output,
        } => {
            let result = ops.include_static_methods(&scope.scope(), include, output.dry_run)?;
            report(&result, &output)
        }
    }
}
