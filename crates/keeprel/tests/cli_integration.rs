//! End-to-end CLI integration tests.
//!
//! Each test creates a temporary git repository with a changelog, runs
//! keeprel in it and checks the changelog, tags and output.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::Command as BinCommand;
use predicates::prelude::*;
use tempfile::TempDir;

const CHANGELOG: &str = "# Changelog

## [Unreleased]

### Added

- hello world

[Unreleased]: https://github.com/owner/project/compare/1.0.0...HEAD
[1.0.0]: https://github.com/owner/project/tag/1.0.0
";

const CONFIG: &str = r#"
[changelog]
repository = "https://github.com/owner/project"

[release]
push = false
"#;

fn keeprel(dir: &Path) -> BinCommand {
    let mut cmd = BinCommand::cargo_bin("keeprel").expect("keeprel binary not built");
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Creates a repository with a changelog and config, committed.
fn setup_git_repo(changelog: &str, config: &str) -> TempDir {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dir = temp_dir.path();

    git(dir, &["init"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "commit.gpgsign", "false"]);

    fs::write(dir.join("CHANGELOG.md"), changelog).expect("failed to write changelog");
    fs::write(dir.join("keeprel.toml"), config).expect("failed to write config");

    git(dir, &["add", "."]);
    git(dir, &["commit", "-m", "Initial commit"]);

    temp_dir
}

fn read_changelog(dir: &Path) -> String {
    fs::read_to_string(dir.join("CHANGELOG.md")).expect("failed to read changelog")
}

#[test]
fn test_release_dry_run() {
    let temp_dir = setup_git_repo(CHANGELOG, CONFIG);
    let dir = temp_dir.path();
    git(dir, &["tag", "1.0.0"]);

    keeprel(dir)
        .args(["release", "--dry-run", "--minor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current version: \"1.0.0\""))
        .stdout(predicate::str::contains("Next version: \"1.1.0\""))
        .stdout(predicate::str::contains("Update changelog"))
        .stdout(predicate::str::contains("Running command: git tag 1.1.0"))
        .stdout(predicate::str::contains(
            "Running command: git commit -m \"Increase version to 1.1.0\"",
        ));

    assert_eq!(read_changelog(dir), CHANGELOG);
    assert_eq!(git(dir, &["tag", "-l"]).trim(), "1.0.0");
}

#[test]
fn test_release_commits_and_tags() {
    let temp_dir = setup_git_repo(CHANGELOG, CONFIG);
    let dir = temp_dir.path();
    git(dir, &["tag", "1.0.0"]);

    keeprel(dir)
        .args(["release", "--minor", "--date", "2021-02-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Release 1.1.0 completed successfully!"));

    let changelog = read_changelog(dir);
    assert!(changelog.contains("## [Unreleased]\n\n## [1.1.0] - 2021-02-01\n\n### Added"));
    assert!(changelog.contains(
        "[Unreleased]: https://github.com/owner/project/compare/1.1.0...HEAD\n\
         [1.1.0]: https://github.com/owner/project/compare/1.0.0...1.1.0\n\
         [1.0.0]: https://github.com/owner/project/tag/1.0.0\n"
    ));

    let tags = git(dir, &["tag", "-l"]);
    assert!(tags.lines().any(|t| t == "1.1.0"), "tags: {tags}");

    let subject = git(dir, &["log", "-1", "--format=%s"]);
    assert_eq!(subject.trim(), "Increase version to 1.1.0");

    let status = git(dir, &["status", "--porcelain"]);
    assert!(status.trim().is_empty(), "working tree not clean: {status}");
}

#[test]
fn test_changelog_first_release() {
    let changelog = "## [Unreleased]

### Added

- hello world

[Unreleased]: https://example/tree/master
";
    let config = r#"
[changelog]
repository = "https://example"
"#;
    let temp_dir = setup_git_repo(changelog, config);
    let dir = temp_dir.path();

    keeprel(dir)
        .args(["changelog", "--major", "--date", "2021-01-01"])
        .assert()
        .success();

    assert_eq!(
        read_changelog(dir),
        "## [Unreleased]

## [1.0.0] - 2021-01-01

### Added

- hello world

[Unreleased]: https://example/compare/1.0.0...HEAD
[1.0.0]: https://example/tag/1.0.0
"
    );
    assert!(git(dir, &["tag", "-l"]).trim().is_empty());
}

#[test]
fn test_changelog_from_subdirectory() {
    let temp_dir = setup_git_repo(CHANGELOG, CONFIG);
    let dir = temp_dir.path();
    git(dir, &["tag", "1.0.0"]);
    let sub = dir.join("src").join("nested");
    fs::create_dir_all(&sub).expect("failed to create subdirectory");

    keeprel(&sub)
        .args(["changelog", "--date", "2021-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("for version 1.0.1"));

    assert!(read_changelog(dir).contains("## [1.0.1] - 2021-03-01"));
    assert!(!sub.join("CHANGELOG.md").exists());
}

#[test]
fn test_release_with_tag_prefix() {
    let changelog = "## [Unreleased]

- fix

[Unreleased]: https://example/compare/v1.0.0...HEAD
";
    let config = r#"
[version]
tag_prefix = "v"

[changelog]
repository = "https://example"

[release]
push = false
"#;
    let temp_dir = setup_git_repo(changelog, config);
    let dir = temp_dir.path();
    git(dir, &["tag", "v1.0.0"]);

    keeprel(dir)
        .args(["release", "--date", "2021-04-01"])
        .assert()
        .success();

    let changelog = read_changelog(dir);
    assert!(changelog.contains("## [1.0.1] - 2021-04-01"));
    assert!(changelog.contains(
        "[Unreleased]: https://example/compare/v1.0.1...HEAD\n\
         [1.0.1]: https://example/compare/v1.0.0...v1.0.1\n"
    ));

    let tags = git(dir, &["tag", "-l"]);
    assert!(tags.lines().any(|t| t == "v1.0.1"), "tags: {tags}");
}

#[test]
fn test_changelog_skips_unparseable_tags() {
    let temp_dir = setup_git_repo(CHANGELOG, CONFIG);
    let dir = temp_dir.path();
    for tag in ["v1.0.0", "1.0.0", "1.2.0", "0.9.0"] {
        git(dir, &["tag", tag]);
    }

    keeprel(dir)
        .args(["changelog", "--date", "2021-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Next version: \"1.2.1\""));

    assert!(read_changelog(dir).contains(
        "[1.2.1]: https://github.com/owner/project/compare/1.2.0...1.2.1\n"
    ));
}

#[test]
fn test_malformed_changelog_fails() {
    let temp_dir = setup_git_repo("# Changelog\n\nNothing here.\n", CONFIG);
    let dir = temp_dir.path();

    keeprel(dir)
        .args(["release"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unreleased level 2 header not found"));

    assert_eq!(read_changelog(dir), "# Changelog\n\nNothing here.\n");
    assert!(git(dir, &["tag", "-l"]).trim().is_empty());
}

#[test]
fn test_repository_url_from_origin() {
    let temp_dir = setup_git_repo("## [Unreleased]\n\n[Unreleased]: x\n", "");
    let dir = temp_dir.path();
    git(
        dir,
        &["remote", "add", "origin", "git@github.com:owner/project.git"],
    );

    keeprel(dir)
        .args(["changelog", "--date", "2021-01-01"])
        .assert()
        .success();

    assert!(
        read_changelog(dir).contains("[0.0.1]: https://github.com/owner/project/tag/0.0.1\n")
    );
}

#[test]
fn test_missing_repository_url_fails() {
    let temp_dir = setup_git_repo(CHANGELOG, "");
    let dir = temp_dir.path();

    keeprel(dir)
        .args(["changelog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("changelog.repository"));

    assert_eq!(read_changelog(dir), CHANGELOG);
}

#[test]
fn test_next_major_wins() {
    let temp_dir = setup_git_repo(CHANGELOG, CONFIG);
    let dir = temp_dir.path();
    git(dir, &["tag", "1.2.3"]);

    keeprel(dir)
        .args(["next", "--patch", "--minor", "--major"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current version: \"1.2.3\""))
        .stdout(predicate::str::contains("Next version: \"2.0.0\""));
}

#[test]
fn test_not_a_repository_fails() {
    let temp_dir = TempDir::new().unwrap();

    keeprel(temp_dir.path())
        .args(["next"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open git repository"));
}

#[test]
fn test_help_command() {
    let temp_dir = TempDir::new().unwrap();

    keeprel(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("release"))
        .stdout(predicate::str::contains("changelog"))
        .stdout(predicate::str::contains("next"));
}
