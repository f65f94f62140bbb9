//! Configuration schema.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Placeholder replaced by the new version in the release commit message.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Version configuration.
    #[serde(default)]
    pub version: VersionConfig,

    /// Changelog configuration.
    #[serde(default)]
    pub changelog: ChangelogConfig,

    /// Release configuration.
    #[serde(default)]
    pub release: ReleaseConfig,
}

impl Config {
    /// Checks values that deserialize fine but cannot drive a release.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first offending value.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.changelog.path.trim().is_empty() {
            return Err(ConfigError::Invalid("changelog.path is empty".to_string()));
        }

        if !self.release.commit_message.contains(VERSION_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "release.commit_message must contain {VERSION_PLACEHOLDER}"
            )));
        }

        if let Some(ref repository) = self.changelog.repository
            && !(repository.starts_with("https://") || repository.starts_with("http://"))
        {
            return Err(ConfigError::Invalid(format!(
                "changelog.repository is not an http(s) URL: {repository}"
            )));
        }

        Ok(())
    }
}

/// Version configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionConfig {
    /// Tag prefix (e.g., "v"). Empty means tags are bare versions.
    #[serde(default)]
    pub tag_prefix: String,
}

/// Changelog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogConfig {
    /// Changelog file path.
    #[serde(default = "default_changelog_path")]
    pub path: String,

    /// Repository web URL used as the base of compare/tag links.
    pub repository: Option<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            path: default_changelog_path(),
            repository: None,
        }
    }
}

fn default_changelog_path() -> String {
    "CHANGELOG.md".to_string()
}

/// Release configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
    /// Commit message template, `{version}` is replaced.
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Push commits and tags after tagging.
    #[serde(default = "default_true")]
    pub push: bool,

    /// Remote whose URL is used when no repository URL is configured.
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            commit_message: default_commit_message(),
            push: default_true(),
            remote: default_remote(),
        }
    }
}

fn default_commit_message() -> String {
    format!("Increase version to {VERSION_PLACEHOLDER}")
}

fn default_true() -> bool {
    true
}

fn default_remote() -> String {
    "origin".to_string()
}
