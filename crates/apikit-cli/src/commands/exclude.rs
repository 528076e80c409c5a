//! Exclusion regex command
//!
//! Handles: apikit exclude <target> <regex>

use clap::{Args, ValueEnum};

use apikit_core::config::ExcludeTarget;

use super::{report, Context, OutputArgs, ScopeArgs};

/// Element an exclusion regex is merged into
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ExcludeKind {
    JavadocPackages,
    JavadocClasses,
    JavadocMethods,
    ConfigNames,
    ConfigTypes,
}

impl From<ExcludeKind> for ExcludeTarget {
    fn from(kind: ExcludeKind) -> Self {
        match kind {
            ExcludeKind::JavadocPackages => Self::JavadocPackages,
            ExcludeKind::JavadocClasses => Self::JavadocClasses,
            ExcludeKind::JavadocMethods => Self::JavadocMethods,
            ExcludeKind::ConfigNames => Self::ConfigNames,
            ExcludeKind::ConfigTypes => Self::ConfigTypes,
        }
    }
}

/// Arguments for `apikit exclude`
#[derive(Args)]
pub struct ExcludeArgs {
    /// What to exclude
    #[arg(value_enum)]
    pub target: ExcludeKind,

    /// Regular expression
    pub regex: String,

    /// Append to the existing regex instead of replacing it
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub append: bool,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute `apikit exclude`
pub fn execute(ctx: &Context, args: &ExcludeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let result = ctx.plugin_ops().exclude(
        &args.scope.scope(),
        args.target.into(),
        &args.regex,
        args.append,
        args.output.dry_run,
    )?;
    report(&result, &args.output)
}
