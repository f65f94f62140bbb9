//! Version resolution from tags.

use semver::{BuildMetadata, Prerelease, Version};
use tracing::{debug, warn};

use crate::{CoreError, CoreResult};

/// Version bump type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BumpType {
    /// Major version bump (breaking changes).
    Major,
    /// Minor version bump (new features).
    Minor,
    /// Patch version bump (bug fixes).
    #[default]
    Patch,
}

impl BumpType {
    /// Resolves independent bump flags into one bump type.
    ///
    /// Major wins over minor, minor over patch. Without any flag the bump is
    /// a patch.
    #[must_use]
    pub fn from_flags(major: bool, minor: bool, _patch: bool) -> Self {
        if major {
            Self::Major
        } else if minor {
            Self::Minor
        } else {
            Self::Patch
        }
    }
}

impl std::fmt::Display for BumpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
        }
    }
}

/// Returns true when `previous` is the `0.0.0` "no prior release" sentinel.
#[must_use]
pub fn is_first_release(previous: &Version) -> bool {
    *previous == Version::new(0, 0, 0)
}

/// Resolves the latest and next versions from tag names.
#[derive(Debug, Clone, Default)]
pub struct VersionResolver {
    tag_prefix: String,
}

impl VersionResolver {
    /// Creates a resolver for tags named `<prefix><version>`.
    #[must_use]
    pub fn new(tag_prefix: impl Into<String>) -> Self {
        Self {
            tag_prefix: tag_prefix.into(),
        }
    }

    /// Returns the configured tag prefix.
    #[must_use]
    pub fn tag_prefix(&self) -> &str {
        &self.tag_prefix
    }

    /// Returns the tag name for a version.
    #[must_use]
    pub fn tag_name(&self, version: &Version) -> String {
        format!("{}{version}", self.tag_prefix)
    }

    /// Extracts the version from a tag.
    #[must_use]
    pub fn parse_tag(&self, tag: &str) -> Option<Version> {
        let version_str = tag.strip_prefix(self.tag_prefix.as_str())?;
        Version::parse(version_str).ok()
    }

    /// Returns the highest version among `tags`, or `0.0.0` if none parse.
    ///
    /// Tags that are not versions are skipped with a warning.
    pub fn resolve_latest<I, S>(&self, tags: I) -> Version
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let latest = tags
            .into_iter()
            .filter_map(|tag| {
                let tag = tag.as_ref();
                let parsed = self.parse_tag(tag);
                if parsed.is_none() {
                    warn!(%tag, "skipping tag that is not a version");
                }
                parsed
            })
            .max()
            .unwrap_or_else(|| Version::new(0, 0, 0));

        debug!(%latest, "resolved latest version");
        latest
    }

    /// Bumps a version according to the bump type.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::VersionOverflow`] if the bumped component is
    /// already `u64::MAX`.
    pub fn next_version(&self, latest: &Version, bump: BumpType) -> CoreResult<Version> {
        let overflow = || CoreError::VersionOverflow {
            version: latest.clone(),
            bump,
        };
        let mut next = latest.clone();

        match bump {
            BumpType::Major => {
                next.major = next.major.checked_add(1).ok_or_else(overflow)?;
                next.minor = 0;
                next.patch = 0;
            }
            BumpType::Minor => {
                next.minor = next.minor.checked_add(1).ok_or_else(overflow)?;
                next.patch = 0;
            }
            BumpType::Patch => {
                next.patch = next.patch.checked_add(1).ok_or_else(overflow)?;
            }
        }

        next.pre = Prerelease::EMPTY;
        next.build = BuildMetadata::EMPTY;
        Ok(next)
    }
}
