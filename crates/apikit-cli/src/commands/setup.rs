//! Project setup command
//!
//! Handles: apikit setup

use clap::Args;

use apikit_core::setup::ProjectSetup;

use super::{report, Context, OutputArgs};

/// Arguments for `apikit setup`
#[derive(Args)]
pub struct SetupArgs {
    /// Component name, e.g. 'LinkedIn'
    #[arg(long)]
    pub name: String,

    /// Component scheme name, e.g. 'linkedin'
    #[arg(long)]
    pub scheme: String,

    /// Component Java package, e.g. 'org.apache.camel.component.linkedin'
    #[arg(long)]
    pub package: String,

    /// Camel version to use (latest local version when omitted)
    #[arg(long)]
    pub camel_version: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute `apikit setup`
pub fn execute(ctx: &Context, args: &SetupArgs) -> Result<(), Box<dyn std::error::Error>> {
    let setup = ProjectSetup::new(ctx.settings.clone(), ctx.project.clone());
    let result = setup.apply(
        &args.name,
        &args.scheme,
        &args.package,
        args.camel_version.as_deref(),
        args.output.dry_run,
    )?;
    report(&result, &args.output)
}
