//! Promotion of the `Unreleased` changelog section.
//!
//! The changelog is treated as flat text with two markers: the
//! `## [Unreleased]` header and the `[Unreleased]: <url>` link line. Everything
//! outside those markers is copied through untouched, so no Markdown parsing
//! happens here.

use std::fmt::Write;
use std::fs;
use std::path::Path;

use semver::Version;
use tracing::{debug, info};

use crate::files::write_atomic;
use crate::version::is_first_release;
use crate::{CoreResult, Malformed};

/// Header of the section holding unreleased changes.
pub const UNRELEASED_HEADER: &str = "## [Unreleased]";

/// Prefix of the link reference line for unreleased changes.
pub const UNRELEASED_LINK: &str = "[Unreleased]: ";

/// Rewrites a changelog for a new release.
#[derive(Debug, Clone)]
pub struct ChangelogRewriter {
    repository: String,
    tag_prefix: String,
}

impl ChangelogRewriter {
    /// Creates a rewriter generating links below `repository`
    /// (e.g. `https://github.com/owner/project`).
    #[must_use]
    pub fn new(repository: impl Into<String>) -> Self {
        let repository = repository.into();
        Self {
            repository: repository.trim_end_matches('/').to_string(),
            tag_prefix: String::new(),
        }
    }

    /// Sets the prefix of the tags the compare and tag links point at.
    ///
    /// Section headers and link labels keep the bare version.
    #[must_use]
    pub fn with_tag_prefix(mut self, tag_prefix: impl Into<String>) -> Self {
        self.tag_prefix = tag_prefix.into();
        self
    }

    /// Moves the `Unreleased` entries under a new `next` section.
    ///
    /// A `## [<next>] - <date>` header is inserted right after the
    /// `Unreleased` header, the `Unreleased` link is repointed to compare
    /// `next` with `HEAD`, and a link for `next` is added below it. The link
    /// targets the tag when `previous` is `0.0.0`, otherwise it compares
    /// `previous` with `next`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::MalformedDocument`] if the header is
    /// missing, no link line follows it, or the link line has no newline.
    pub fn promote_unreleased(
        &self,
        document: &str,
        previous: &Version,
        next: &Version,
        date: &str,
    ) -> CoreResult<String> {
        let header_start = document
            .find(UNRELEASED_HEADER)
            .ok_or(Malformed::MissingHeader)?;
        let (prefix, remainder) = document.split_at(header_start + UNRELEASED_HEADER.len());

        let link_start =
            find_line_starting_with(remainder, UNRELEASED_LINK).ok_or(Malformed::MissingLink)?;
        let (body, link_and_tail) = remainder.split_at(link_start);

        let link_end = link_and_tail
            .find('\n')
            .ok_or(Malformed::UnterminatedLink)?;
        let tail = &link_and_tail[link_end + 1..];

        debug!(
            prefix = prefix.len(),
            body = body.len(),
            tail = tail.len(),
            "located unreleased markers"
        );

        let repository = &self.repository;
        let next_tag = self.tag_name(next);
        let mut output = String::with_capacity(document.len() + 2 * repository.len() + 64);
        output.push_str(prefix);
        _ = write!(output, "\n\n## [{next}] - {date}");
        output.push_str(body);
        _ = writeln!(output, "{UNRELEASED_LINK}{repository}/compare/{next_tag}...HEAD");
        _ = writeln!(output, "[{next}]: {}", self.version_link(previous, next));
        output.push_str(tail);

        Ok(output)
    }

    fn tag_name(&self, version: &Version) -> String {
        format!("{}{version}", self.tag_prefix)
    }

    fn version_link(&self, previous: &Version, next: &Version) -> String {
        let next_tag = self.tag_name(next);
        if is_first_release(previous) {
            format!("{}/tag/{next_tag}", self.repository)
        } else {
            let previous_tag = self.tag_name(previous);
            format!("{}/compare/{previous_tag}...{next_tag}", self.repository)
        }
    }
}

/// Returns the offset of the first line in `text` that starts with `prefix`.
///
/// `text` is assumed to begin mid-line, so a match at offset 0 does not count.
fn find_line_starting_with(text: &str, prefix: &str) -> Option<usize> {
    text.match_indices(prefix)
        .map(|(offset, _)| offset)
        .find(|&offset| offset > 0 && text.as_bytes()[offset - 1] == b'\n')
}

/// Promotes the `Unreleased` section of the changelog at `path` in place.
///
/// The file is replaced atomically; if reading or rewriting fails it is not
/// touched.
///
/// # Errors
///
/// Returns an error if the file cannot be read or replaced, or if the
/// changelog is malformed.
pub fn update_changelog_file(
    path: &Path,
    rewriter: &ChangelogRewriter,
    previous: &Version,
    next: &Version,
    date: &str,
) -> CoreResult<()> {
    let document = fs::read_to_string(path)?;
    let updated = rewriter.promote_unreleased(&document, previous, next, date)?;
    write_atomic(path, &updated)?;

    info!(path = %path.display(), %next, "updated changelog");
    Ok(())
}
