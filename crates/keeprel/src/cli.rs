//! CLI definition.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Promote the Unreleased changelog section, tag and push a release.
#[derive(Debug, Parser)]
#[command(name = "keeprel")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a full release (changelog + commit + tag + push)
    Release(commands::release::ReleaseArgs),

    /// Promote the Unreleased changelog section only
    Changelog(commands::changelog::ChangelogArgs),

    /// Show the current and next version
    Next(commands::next::NextArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Release(args) => commands::release::run(&args),
            Commands::Changelog(args) => commands::changelog::run(&args),
            Commands::Next(args) => commands::next::run(&args),
        }
    }
}
