//! Subcommand implementations.

pub mod changelog;
pub mod next;
pub mod release;

use std::env;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use semver::Version;
use tracing::debug;

use keeprel_config::{Config, load_or_default};
use keeprel_core::{BumpType, ChangelogRewriter, ReleaseManager, VersionResolver};
use keeprel_git::{Repository, web_url};

/// Bump selection flags.
///
/// When several are given the largest wins.
#[derive(Debug, Args)]
pub struct BumpArgs {
    /// Increment the major version
    #[arg(long)]
    pub major: bool,

    /// Increment the minor version
    #[arg(long)]
    pub minor: bool,

    /// Increment the patch version (default)
    #[arg(long)]
    pub patch: bool,
}

impl BumpArgs {
    /// Resolves the flags into a single bump type.
    pub fn bump_type(&self) -> BumpType {
        BumpType::from_flags(self.major, self.minor, self.patch)
    }
}

/// Release date argument.
#[derive(Debug, Args)]
pub struct DateArgs {
    /// Release date written to the changelog (default: today, local time)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,
}

impl DateArgs {
    /// Returns the given date or today's.
    pub fn resolve(&self) -> String {
        self.date
            .clone()
            .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string())
    }
}

/// Loads the configuration for the current directory.
fn load_config() -> Result<Config> {
    let current_dir = env::current_dir().context("failed to read current directory")?;
    load_or_default(&current_dir).context("failed to load configuration")
}

/// Builds a release manager from the configuration and the enclosing repository.
fn build_manager(dry_run: bool) -> Result<ReleaseManager<Repository>> {
    let config = load_config()?;
    let repo = Repository::discover()
        .context("failed to open git repository")?
        .with_dry_run(dry_run);

    let repository_url = match config.changelog.repository {
        Some(url) => url,
        None => {
            let remote_name = &config.release.remote;
            let remote = repo
                .remote_url(remote_name)
                .context("no changelog.repository configured")?;
            web_url(&remote).with_context(|| {
                format!("cannot derive a web URL from remote {remote}; set changelog.repository")
            })?
        }
    };
    debug!(%repository_url, "using repository URL");

    let changelog_path = repo.path().join(&config.changelog.path);
    debug!(
        workdir = %repo.path().display(),
        changelog = %changelog_path.display(),
        dry_run = repo.is_dry_run(),
        "opened repository"
    );

    Ok(ReleaseManager::new(
        repo,
        VersionResolver::new(config.version.tag_prefix),
        ChangelogRewriter::new(repository_url),
        changelog_path,
    )
    .with_commit_message(config.release.commit_message)
    .with_push(config.release.push))
}

/// Prints the current and next version.
fn print_versions(current: &Version, next: &Version) {
    println!("Current version: {:?}", current.to_string());
    println!("Next version: {:?}", next.to_string());
}
