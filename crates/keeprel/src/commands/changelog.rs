//! Changelog command.

use anyhow::{Context, Result};
use clap::Args;

use keeprel_core::ReleaseOptions;

use super::{BumpArgs, DateArgs, build_manager, print_versions};

/// Arguments for the changelog command.
#[derive(Debug, Args)]
pub struct ChangelogArgs {
    /// Show the new version without touching the changelog
    #[arg(short, long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub bump: BumpArgs,

    #[command(flatten)]
    pub date: DateArgs,
}

/// Runs the changelog command.
pub fn run(args: &ChangelogArgs) -> Result<()> {
    let options = ReleaseOptions {
        dry_run: args.dry_run,
        bump: args.bump.bump_type(),
        date: args.date.resolve(),
    };

    let manager = build_manager(options.dry_run)?;
    let plan = manager
        .plan(&options)
        .context("failed to determine versions")?;
    print_versions(&plan.previous, &plan.next);

    let path = manager.changelog_path().display();
    if options.dry_run {
        println!("Would update {path}");
    } else {
        manager
            .update_changelog(&plan, &options)
            .with_context(|| format!("failed to update {path}"))?;
        println!("Updated {path} for version {}", plan.next);
    }

    Ok(())
}
