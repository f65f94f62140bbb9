//! Core error types.

use semver::Version;
use thiserror::Error;

use crate::BumpType;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Git error.
    #[error("git error: {0}")]
    Git(#[from] keeprel_git::GitError),

    /// The changelog lacks a marker the rewrite depends on.
    #[error("malformed changelog: {0}")]
    MalformedDocument(#[from] Malformed),

    /// Bumping would overflow a version component.
    #[error("cannot apply a {bump} bump to {version}: component overflows")]
    VersionOverflow {
        /// The version being bumped.
        version: Version,
        /// The requested bump.
        bump: BumpType,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which changelog marker is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Malformed {
    /// No `## [Unreleased]` header.
    #[error("unreleased level 2 header not found")]
    MissingHeader,

    /// No `[Unreleased]: ` link line after the header.
    #[error("unreleased link start not found")]
    MissingLink,

    /// The link line is not terminated by a newline.
    #[error("unreleased link end not found")]
    UnterminatedLink,
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
