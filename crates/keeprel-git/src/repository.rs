//! Git repository wrapper.

use std::path::{Path, PathBuf};

use git2::Repository as Git2Repo;
use tracing::info;

use crate::{GitCommand, GitError, GitResult};

/// Source-control operations a release needs.
pub trait SourceControl {
    /// Returns all tag names.
    ///
    /// # Errors
    ///
    /// Returns an error if tags cannot be read.
    fn tags(&self) -> GitResult<Vec<String>>;

    /// Stages a path.
    ///
    /// # Errors
    ///
    /// Returns an error if staging fails.
    fn add(&self, path: &Path) -> GitResult<()>;

    /// Creates a commit with the given message.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    fn commit(&self, message: &str) -> GitResult<()>;

    /// Creates a tag at HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be created.
    fn tag(&self, name: &str) -> GitResult<()>;

    /// Pushes commits to the upstream.
    ///
    /// # Errors
    ///
    /// Returns an error if the push fails.
    fn push(&self) -> GitResult<()>;

    /// Pushes tags to the upstream.
    ///
    /// # Errors
    ///
    /// Returns an error if the push fails.
    fn push_tags(&self) -> GitResult<()>;
}

/// A Git repository wrapper.
///
/// Reads go through libgit2. Writes shell out to `git` so hooks, signing
/// and credential helpers behave exactly as on the command line.
pub struct Repository {
    inner: Git2Repo,
    workdir: PathBuf,
    dry_run: bool,
}

impl Repository {
    /// Opens a repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid Git repository.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner = Git2Repo::open(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self::from_git2(inner))
    }

    /// Discovers the repository from the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found.
    pub fn discover() -> GitResult<Self> {
        let inner = Git2Repo::discover(".")?;
        Ok(Self::from_git2(inner))
    }

    fn from_git2(inner: Git2Repo) -> Self {
        let workdir = inner.workdir().unwrap_or_else(|| inner.path()).to_path_buf();
        Self {
            inner,
            workdir,
            dry_run: false,
        }
    }

    /// Announces mutating commands without executing them.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.workdir
    }

    /// Returns whether mutating commands are skipped.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the URL of the named remote.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote does not exist or has no UTF-8 URL.
    pub fn remote_url(&self, name: &str) -> GitResult<String> {
        let remote = self
            .inner
            .find_remote(name)
            .map_err(|_| GitError::RemoteNotFound(name.to_string()))?;

        remote
            .url()
            .map(String::from)
            .ok_or_else(|| GitError::RemoteNotFound(name.to_string()))
    }

    /// Announces a command and runs it unless in dry-run mode.
    fn run(&self, command: &GitCommand) -> GitResult<()> {
        println!("Running command: {command}");

        if self.dry_run {
            info!(%command, "dry run, not executing");
            return Ok(());
        }

        command.run(&self.workdir)?;
        Ok(())
    }
}

impl SourceControl for Repository {
    fn tags(&self) -> GitResult<Vec<String>> {
        let tags = self.inner.tag_names(None)?;
        Ok(tags.iter().flatten().map(String::from).collect())
    }

    fn add(&self, path: &Path) -> GitResult<()> {
        self.run(&GitCommand::add(path))
    }

    fn commit(&self, message: &str) -> GitResult<()> {
        self.run(&GitCommand::commit(message))
    }

    fn tag(&self, name: &str) -> GitResult<()> {
        self.run(&GitCommand::tag(name))
    }

    fn push(&self) -> GitResult<()> {
        self.run(&GitCommand::push())
    }

    fn push_tags(&self) -> GitResult<()> {
        self.run(&GitCommand::push_tags())
    }
}
