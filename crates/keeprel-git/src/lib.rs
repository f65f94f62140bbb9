//! Git abstraction layer for keeprel.
//!
//! This crate provides the source-control side of a release:
//! - Repository discovery and tag listing
//! - Staging, committing, tagging and pushing through the system `git`
//! - Dry-run display of every mutating command

mod command;
mod error;
mod remote;
mod repository;

pub use command::GitCommand;
pub use error::{GitError, GitResult};
pub use remote::web_url;
pub use repository::{Repository, SourceControl};
