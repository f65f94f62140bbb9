//! Release command.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use keeprel_core::ReleaseOptions;

use super::{BumpArgs, DateArgs, build_manager, print_versions};

/// Arguments for the release command.
#[derive(Debug, Args)]
pub struct ReleaseArgs {
    /// Show what would be done without changing anything
    #[arg(short, long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub bump: BumpArgs,

    #[command(flatten)]
    pub date: DateArgs,
}

/// Runs the release command.
pub fn run(args: &ReleaseArgs) -> Result<()> {
    let options = ReleaseOptions {
        dry_run: args.dry_run,
        bump: args.bump.bump_type(),
        date: args.date.resolve(),
    };
    info!(bump = %options.bump, dry_run = options.dry_run, "starting release");

    let manager = build_manager(options.dry_run)?;
    let plan = manager
        .plan(&options)
        .context("failed to determine versions")?;
    print_versions(&plan.previous, &plan.next);

    if options.dry_run {
        println!("Update changelog");
    }

    manager
        .apply(&plan, &options)
        .with_context(|| format!("release {} failed", plan.next))?;

    if options.dry_run {
        println!("\nDry run completed. No changes were made.");
    } else {
        println!("\nRelease {} completed successfully!", plan.next);
    }

    Ok(())
}
