//! Endpoint option, substitution and alias commands
//!
//! Handles: apikit option extra/nullable, apikit substitution, apikit alias

use clap::{Args, Subcommand};

use apikit_core::config::{Alias, ExtraOption, Substitution, ANY_METHOD};

use super::{report, Context, OutputArgs, ScopeArgs};

/// Endpoint option commands
#[derive(Subcommand)]
pub enum OptionCommands {
    /// Add an extra endpoint URI option
    Extra {
        /// Option name
        #[arg(long)]
        name: String,
        /// Java type, generics allowed
        #[arg(long = "type", value_name = "TYPE")]
        type_name: String,
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Mark an endpoint option as nullable
    Nullable {
        /// Option name
        option: String,
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Arguments for `apikit substitution`
#[derive(Args)]
pub struct SubstitutionArgs {
    /// Method name regex
    #[arg(long, default_value = ANY_METHOD)]
    pub method: String,

    /// Argument name regex
    #[arg(long)]
    pub arg_name: String,

    /// Argument type regex
    #[arg(long)]
    pub arg_type: Option<String>,

    /// Replacement expression, may reference regex groups
    #[arg(long)]
    pub replacement: String,

    /// Replace with the argument type instead of its name
    #[arg(long)]
    pub replace_with_type: Option<bool>,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `apikit alias`
#[derive(Args)]
pub struct AliasArgs {
    /// Method name regex
    #[arg(long)]
    pub method_pattern: String,

    /// Alias expression, may reference regex groups
    #[arg(long)]
    pub method_alias: String,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute option command
pub fn execute(ctx: &Context, cmd: OptionCommands) -> Result<(), Box<dyn std::error::Error>> {
    let ops = ctx.plugin_ops();
    match cmd {
        OptionCommands::Extra {
            name,
            type_name,
            scope,
            output,
        } => {
            let option = ExtraOption::new(name, type_name);
            let result = ops.add_extra_option(&scope.scope(), &option, output.dry_run)?;
            report(&result, &output)
        }
        OptionCommands::Nullable {
            option,
            scope,
            output,
        } => {
            let result = ops.add_nullable_option(&scope.scope(), &option, output.dry_run)?;
            report(&result, &output)
        }
    }
}

/// Execute `apikit substitution`
pub fn execute_substitution(
    ctx: &Context,
    args: &SubstitutionArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let substitution = Substitution {
        arg_type: args.arg_type.clone(),
        replace_with_type: args.replace_with_type,
        ..Substitution::new(args.arg_name.as_str(), args.replacement.as_str())
            .with_method(args.method.as_str())
    };
    let result = ctx
        .plugin_ops()
        .add_substitution(&args.scope.scope(), &substitution, args.output.dry_run)?;
    report(&result, &args.output)
}

/// Execute `apikit alias`
pub fn execute_alias(ctx: &Context, args: &AliasArgs) -> Result<(), Box<dyn std::error::Error>> {
    let alias = Alias::new(args.method_pattern.as_str(), args.method_alias.as_str());
    let result = ctx
        .plugin_ops()
        .add_alias(&args.scope.scope(), &alias, args.output.dry_run)?;
    report(&result, &args.output)
}
