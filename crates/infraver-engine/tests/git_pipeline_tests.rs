//! End-to-end version determination against a real `git` repository.
//!
//! Skipped when no `git` executable is available.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use infraver_core::{Increment, ReferenceTag, Sha256Hasher};
use infraver_engine::commands::{determine_version, Baseline, VersionRequest};
use infraver_repo::GitCli;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(repo: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=infraver",
            "-c",
            "user.email=infraver@example.invalid",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "tag.gpgsign=false",
        ])
        .args(args)
        .current_dir(repo)
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Tag `v1.0.0` with one instance, then commit a new resource type.
fn setup_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    let repo = dir.path();
    git(repo, &["init", "-q"]);
    write(
        repo,
        "infra/web.tf",
        "resource \"aws_instance\" \"web\" {\n  ami = \"ami-123\"\n}\n",
    );
    git(repo, &["add", "."]);
    git(repo, &["commit", "-q", "-m", "initial"]);
    git(repo, &["tag", "v1.0.0"]);

    write(
        repo,
        "infra/db.tf",
        "resource \"aws_db_instance\" \"main\" {\n  engine = \"postgres\"\n}\n",
    );
    write(repo, "docs/notes.tf", "resource \"outside\" \"x\" {\n}\n");
    git(repo, &["add", "."]);
    git(repo, &["commit", "-q", "-m", "add database"]);
    dir
}

#[test]
fn test_git_reference_baseline_detects_new_type() {
    if !git_available() {
        return;
    }
    let dir = setup_repo();
    let vcs = GitCli::new(dir.path());
    let request = VersionRequest::new(dir.path(), "infra").with_baseline(Baseline::Reference);

    let outcome = determine_version(&request, &vcs, &Sha256Hasher).unwrap();

    assert_eq!(outcome.reference_tag, ReferenceTag::Tagged("v1.0.0".into()));
    assert_eq!(outcome.increment, Increment::Major);
    assert_eq!(outcome.classification.new_resource_types, vec!["aws_db_instance".to_string()]);
    assert!(outcome.version.starts_with("v2.0.0-"));
}

#[test]
fn test_git_working_tree_baseline_is_patch() {
    if !git_available() {
        return;
    }
    let dir = setup_repo();
    let vcs = GitCli::new(dir.path());

    let outcome =
        determine_version(&VersionRequest::new(dir.path(), "infra"), &vcs, &Sha256Hasher).unwrap();

    assert_eq!(outcome.increment, Increment::Patch);
    assert!(outcome.version.starts_with("v1.0.1-"));
}
