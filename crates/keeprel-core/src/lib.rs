//! Core library for keeprel.
//!
//! This crate resolves the next version from existing tags, promotes the
//! `Unreleased` section of a Keep a Changelog file and orchestrates the
//! release commands.

mod changelog;
mod error;
mod files;
mod release;
mod version;

pub use changelog::{
    ChangelogRewriter, UNRELEASED_HEADER, UNRELEASED_LINK, update_changelog_file,
};
pub use error::{CoreError, CoreResult, Malformed};
pub use files::write_atomic;
pub use release::{DEFAULT_COMMIT_MESSAGE, ReleaseManager, ReleaseOptions, ReleasePlan};
pub use version::{BumpType, VersionResolver, is_first_release};
