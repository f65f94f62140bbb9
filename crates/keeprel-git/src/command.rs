//! System `git` invocations.

use std::fmt;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::{GitError, GitResult};

/// A `git` invocation, kept as data so it can be shown without running it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    args: Vec<String>,
}

impl GitCommand {
    /// Creates a command from its arguments (without the leading `git`).
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `git add <path>`
    #[must_use]
    pub fn add(path: &Path) -> Self {
        Self::new(["add".to_string(), path.display().to_string()])
    }

    /// `git commit -m <message>`
    #[must_use]
    pub fn commit(message: &str) -> Self {
        Self::new(["commit", "-m", message])
    }

    /// `git tag <name>`
    #[must_use]
    pub fn tag(name: &str) -> Self {
        Self::new(["tag", name])
    }

    /// `git push`
    #[must_use]
    pub fn push() -> Self {
        Self::new(["push"])
    }

    /// `git push --tags`
    #[must_use]
    pub fn push_tags() -> Self {
        Self::new(["push", "--tags"])
    }

    /// Runs the command in `workdir` and returns its standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if `git` cannot be spawned or exits unsuccessfully.
    pub fn run(&self, workdir: &Path) -> GitResult<String> {
        debug!(command = %self, ?workdir, "executing");

        let output = Command::new("git")
            .args(&self.args)
            .current_dir(workdir)
            .output()?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: self.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git")?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}
