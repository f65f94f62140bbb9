//! Git error types.

use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(std::path::PathBuf),

    /// Remote not configured.
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// A `git` subprocess exited unsuccessfully.
    #[error("command `{command}` failed: {stderr}")]
    CommandFailed {
        /// The rendered command line.
        command: String,
        /// Trimmed standard error of the command.
        stderr: String,
    },

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;
