//! Completion candidates
//!
//! Handles: apikit complete api-name/proxy-class/camel-version [--latest [--redhat]]

use clap::{Args, ValueEnum};

use apikit_core::classes::ClassCompleter;
use apikit_core::pom::{Coordinate, MavenProject};
use apikit_core::versions::{complete_versions, is_redhat_version, LocalRepository};

use super::Context;

/// What to complete
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum CompletionKind {
    /// Configured API names
    ApiName,
    /// Classes from the project's dependency jars
    ProxyClass,
    /// Camel versions in the local Maven repository
    CamelVersion,
}

/// Arguments for `apikit complete`
#[derive(Args)]
pub struct CompleteArgs {
    #[arg(value_enum)]
    pub kind: CompletionKind,

    /// Prefix to match
    #[arg(default_value = "")]
    pub prefix: String,

    /// Print only the newest Camel version, ignoring the prefix
    #[arg(long)]
    pub latest: bool,

    /// Only Red Hat productized Camel versions
    #[arg(long)]
    pub redhat: bool,
}

/// Execute `apikit complete`
pub fn execute(ctx: &Context, args: &CompleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let repository = LocalRepository::new(&ctx.settings.local_repository);
    let candidates = match args.kind {
        CompletionKind::ApiName => ctx.plugin_ops().complete_api_names(&args.prefix)?,
        CompletionKind::ProxyClass => {
            let project = MavenProject::load(&ctx.project)?;
            ClassCompleter::scan(&project, &repository).complete(&args.prefix)
        }
        CompletionKind::CamelVersion => camel_versions(&repository, args),
    };

    for candidate in candidates {
        println!("{candidate}");
    }
    Ok(())
}

fn camel_versions(repository: &LocalRepository, args: &CompleteArgs) -> Vec<String> {
    let camel_core = Coordinate::new("org.apache.camel", "camel-core");
    if args.latest {
        let latest = if args.redhat {
            repository.latest_redhat_version(&camel_core)
        } else {
            repository.latest_version(&camel_core)
        };
        return Some(latest).filter(|v| !v.is_empty()).into_iter().collect();
    }

    let mut versions = complete_versions(&repository.versions(&camel_core), &args.prefix);
    if args.redhat {
        versions.retain(|v| is_redhat_version(v));
    }
    versions
}
