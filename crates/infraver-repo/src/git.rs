//! `git` command-line collaborator.
//!
//! Every invocation runs in the repository root with stdin closed and a
//! bounded wait. Output pipes are drained on helper threads so a large
//! listing cannot fill the pipe and stall the child before it exits.
//!
//! Paths going in and out are relative to the repository root given to
//! [`GitCli::new`], even when that is a subdirectory of the work tree.

use crate::errors::{vcs_error, vcs_timeout, Result};
use infraver_core::errors::{ExErrorKind, InfraverError};
use infraver_core::VersionControl;
use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;
use wait_timeout::ChildExt;

/// Default time budget for a single `git` invocation.
pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executable run when no other program is configured.
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Captured result of a finished `git` invocation.
#[derive(Debug)]
struct GitOutput {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: String,
}

/// NUL-separated path listing (`-z`) as paths, byte for byte.
fn nul_separated_paths(stdout: &[u8]) -> Vec<PathBuf> {
    stdout
        .split(|b| *b == 0)
        .filter(|entry| !entry.is_empty())
        .map(|entry| PathBuf::from(path_from_bytes(entry)))
        .collect()
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    std::ffi::OsStr::from_bytes(bytes).to_os_string()
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}

/// [`VersionControl`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_root: PathBuf,
    program: PathBuf,
    timeout: Duration,
}

impl GitCli {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            program: PathBuf::from(DEFAULT_GIT_PROGRAM),
            timeout: DEFAULT_GIT_TIMEOUT,
        }
    }

    /// Run `program` instead of the `git` found on `PATH`.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    fn run(&self, args: &[&str]) -> Result<GitOutput> {
        let command = format!("git {}", args.join(" "));
        tracing::debug!(op = "git", command = %command, "running version control command");

        let mut child = Command::new(&self.program)
            .args(args)
            .current_dir(&self.repo_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| vcs_error(&command, &e.to_string()))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let stdout_reader = thread::spawn(move || drain(stdout));
        let stderr_reader = thread::spawn(move || drain(stderr));

        let Some(status) = child
            .wait_timeout(self.timeout)
            .map_err(|e| vcs_error(&command, &e.to_string()))?
        else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(vcs_timeout(&command, self.timeout.as_secs()));
        };

        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = String::from_utf8_lossy(&stderr_reader.join().unwrap_or_default())
            .trim()
            .to_string();

        Ok(GitOutput {
            status,
            stdout,
            stderr,
        })
    }

    fn run_checked(&self, args: &[&str]) -> Result<GitOutput> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(vcs_error(&format!("git {}", args.join(" ")), &output.stderr));
        }
        Ok(output)
    }
}

fn drain<R: Read>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    buf
}

/// Git pathspecs use `/` separators regardless of platform.
fn git_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

impl VersionControl for GitCli {
    /// A missing `git`, a directory outside a repository and a repository
    /// without `v*` tags all read as "no tag". Timeouts still fail.
    fn latest_tag(&self) -> Result<Option<String>> {
        let output = match self.run(&["describe", "--tags", "--abbrev=0", "--match", "v*"]) {
            Ok(output) => output,
            Err(err) if err.kind() == ExErrorKind::VersionControl => {
                tracing::warn!(op = "latest_tag", error = %err, "version control unavailable");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        if !output.status.success() {
            tracing::debug!(op = "latest_tag", stderr = %output.stderr, "no version tag");
            return Ok(None);
        }

        let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!tag.is_empty()).then_some(tag))
    }

    fn changed_files(&self, since: &str) -> Result<Vec<PathBuf>> {
        let output = self.run_checked(&[
            "diff",
            "--name-only",
            "--relative",
            "-z",
            "--diff-filter=d",
            since,
            "HEAD",
        ])?;
        Ok(nul_separated_paths(&output.stdout))
    }

    fn files_at(&self, rev: &str, root: &Path) -> Result<Vec<PathBuf>> {
        let pathspec = git_path(root);
        let mut args = vec!["ls-tree", "-r", "-z", "--name-only", rev];
        if !pathspec.is_empty() {
            args.push("--");
            args.push(&pathspec);
        }
        Ok(nul_separated_paths(&self.run_checked(&args)?.stdout))
    }

    fn read_file_at(&self, rev: &str, path: &Path) -> Result<Vec<u8>> {
        let spec = format!("{}:./{}", rev, git_path(path));
        let output = self.run(&["cat-file", "blob", &spec])?;
        if !output.status.success() {
            return Err(InfraverError::UnknownRevision { spec }.into());
        }
        Ok(output.stdout)
    }
}
