//! apikit CLI - Command-line interface for apikit
//!
//! Provides `apikit setup`, `apikit api`, `apikit option`, `apikit exclude`
//! and the other plugin configuration commands.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::api::ApiCommands;
use commands::complete::CompleteArgs;
use commands::exclude::ExcludeArgs;
use commands::javadoc::JavadocCommands;
use commands::option::{AliasArgs, OptionCommands, SubstitutionArgs};
use commands::setup::SetupArgs;
use commands::{Context, OutputArgs};

#[derive(Parser)]
#[command(name = "apikit")]
#[command(about = "apikit - Camel API component project configuration")]
#[command(version)]
struct Cli {
    /// Project directory holding pom.xml (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Settings file (defaults to apikit.toml, then ~/.apikit/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up an API component project
    Setup(SetupArgs),
    /// Manage API entries
    Api {
        #[command(subcommand)]
        action: ApiCommands,
    },
    /// Add extra or nullable endpoint options
    #[command(name = "option")]
    Options {
        #[command(subcommand)]
        action: OptionCommands,
    },
    /// Add an argument name substitution
    Substitution(SubstitutionArgs),
    /// Add a method alias
    Alias(AliasArgs),
    /// Configure generation from Javadoc
    Javadoc {
        #[command(subcommand)]
        action: JavadocCommands,
    },
    /// Merge an exclusion regex into the configuration
    Exclude(ExcludeArgs),
    /// Generate an API from a signature file
    SignatureFile {
        /// API name
        api: String,
        /// Signature file path
        file: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print completion candidates, one per line
    Complete(CompleteArgs),
    /// Restore the files changed by a command
    Rollback {
        /// Backup ID printed by the command
        backup_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::new(cli.project, cli.config.as_deref())?;
    debug!(project = %ctx.project.display(), backups = ctx.settings.backups, "resolved context");

    match cli.command {
        Commands::Setup(args) => commands::setup::execute(&ctx, &args),
        Commands::Api { action } => commands::api::execute(&ctx, action),
        Commands::Options { action } => commands::option::execute(&ctx, action),
        Commands::Substitution(args) => commands::option::execute_substitution(&ctx, &args),
        Commands::Alias(args) => commands::option::execute_alias(&ctx, &args),
        Commands::Javadoc { action } => commands::javadoc::execute(&ctx, action),
        Commands::Exclude(args) => commands::exclude::execute(&ctx, &args),
        Commands::SignatureFile { api, file, output } => {
            let result = ctx.plugin_ops().add_from_signature_file(&api, &file, output.dry_run)?;
            commands::report(&result, &output)
        }
        Commands::Complete(args) => commands::complete::execute(&ctx, &args),
        Commands::Rollback { backup_id, json } => {
            commands::rollback::execute(&ctx, &backup_id, json)
        }
    }
}
