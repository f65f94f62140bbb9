//! Next-version command.

use anyhow::{Context, Result};
use clap::Args;

use keeprel_core::VersionResolver;
use keeprel_git::{Repository, SourceControl};

use super::{BumpArgs, load_config, print_versions};

/// Arguments for the next command.
#[derive(Debug, Args)]
pub struct NextArgs {
    #[command(flatten)]
    pub bump: BumpArgs,
}

/// Runs the next command.
pub fn run(args: &NextArgs) -> Result<()> {
    let config = load_config()?;
    let repo = Repository::discover().context("failed to open git repository")?;
    let tags = repo.tags().context("failed to list tags")?;

    let resolver = VersionResolver::new(config.version.tag_prefix);
    let current = resolver.resolve_latest(&tags);
    let next = resolver
        .next_version(&current, args.bump.bump_type())
        .context("failed to determine next version")?;

    print_versions(&current, &next);
    Ok(())
}
