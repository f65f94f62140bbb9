//! Release orchestration.

use std::path::{Path, PathBuf};

use keeprel_git::SourceControl;
use semver::Version;
use tracing::{debug, info};

use crate::changelog::update_changelog_file;
use crate::{BumpType, ChangelogRewriter, CoreResult, VersionResolver};

/// Default release commit message; `{version}` is replaced by the new version.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Increase version to {version}";

/// Options for a single release run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOptions {
    /// Report the changelog update instead of performing it.
    pub dry_run: bool,
    /// Which part of the version to bump.
    pub bump: BumpType,
    /// Release date written into the changelog, pre-formatted.
    pub date: String,
}

/// The versions involved in a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    /// Latest released version, `0.0.0` if there is none.
    pub previous: Version,
    /// Version being released.
    pub next: Version,
    /// Tag to create for `next`.
    pub tag: String,
}

/// Drives a release: version resolution, changelog promotion and git commands.
pub struct ReleaseManager<S> {
    vcs: S,
    resolver: VersionResolver,
    rewriter: ChangelogRewriter,
    changelog_path: PathBuf,
    commit_message: String,
    push: bool,
}

impl<S: SourceControl> ReleaseManager<S> {
    /// Creates a release manager.
    ///
    /// The rewriter takes over the resolver's tag prefix so changelog links
    /// point at the tags actually created.
    #[must_use]
    pub fn new(
        vcs: S,
        resolver: VersionResolver,
        rewriter: ChangelogRewriter,
        changelog_path: impl Into<PathBuf>,
    ) -> Self {
        let rewriter = rewriter.with_tag_prefix(resolver.tag_prefix());
        Self {
            vcs,
            resolver,
            rewriter,
            changelog_path: changelog_path.into(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            push: true,
        }
    }

    /// Sets the commit message template.
    #[must_use]
    pub fn with_commit_message(mut self, template: impl Into<String>) -> Self {
        self.commit_message = template.into();
        self
    }

    /// Sets whether commits and tags are pushed.
    #[must_use]
    pub fn with_push(mut self, push: bool) -> Self {
        self.push = push;
        self
    }

    /// Returns the changelog path.
    #[must_use]
    pub fn changelog_path(&self) -> &Path {
        &self.changelog_path
    }

    /// Computes the previous and next version from the repository tags.
    ///
    /// # Errors
    ///
    /// Returns an error if tags cannot be listed or the bump overflows.
    pub fn plan(&self, options: &ReleaseOptions) -> CoreResult<ReleasePlan> {
        let bump = options.bump;
        let tags = self.vcs.tags()?;
        debug!(count = tags.len(), "listed tags");

        let previous = self.resolver.resolve_latest(&tags);
        let next = self.resolver.next_version(&previous, bump)?;
        let tag = self.resolver.tag_name(&next);

        info!(%previous, %next, %bump, "calculated new version");
        Ok(ReleasePlan {
            previous,
            next,
            tag,
        })
    }

    /// Promotes the `Unreleased` changelog section to `plan.next`.
    ///
    /// Nothing is written in dry-run mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the changelog cannot be read, is malformed, or
    /// cannot be replaced.
    pub fn update_changelog(&self, plan: &ReleasePlan, options: &ReleaseOptions) -> CoreResult<()> {
        if options.dry_run {
            info!(path = %self.changelog_path.display(), "dry run, not updating changelog");
            return Ok(());
        }

        update_changelog_file(
            &self.changelog_path,
            &self.rewriter,
            &plan.previous,
            &plan.next,
            &options.date,
        )
    }

    /// Stages the changelog, commits, tags and pushes.
    ///
    /// Stops at the first failing command; earlier commands are not undone.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing command.
    pub fn publish(&self, plan: &ReleasePlan) -> CoreResult<()> {
        let message = self
            .commit_message
            .replace("{version}", &plan.next.to_string());

        self.vcs.add(&self.changelog_path)?;
        self.vcs.commit(&message)?;
        self.vcs.tag(&plan.tag)?;

        if self.push {
            self.vcs.push()?;
            self.vcs.push_tags()?;
        } else {
            info!("push disabled, skipping");
        }

        info!(version = %plan.next, tag = %plan.tag, "release published");
        Ok(())
    }

    /// Runs the changelog update followed by [`Self::publish`].
    ///
    /// # Errors
    ///
    /// Returns the first error; later steps are not attempted.
    pub fn apply(&self, plan: &ReleasePlan, options: &ReleaseOptions) -> CoreResult<()> {
        self.update_changelog(plan, options)?;
        self.publish(plan)
    }
}
