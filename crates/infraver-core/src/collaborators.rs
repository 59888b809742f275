//! Collaborator seams for version control and content hashing.
//!
//! The classifier and the version calculator only see these traits, so they
//! run against [`InMemoryVersionControl`] in tests and against the `git`
//! command line (`infraver_repo::git::GitCli`) in production.

use crate::errors::{InfraverError, Result};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Version-control operations needed to compute a change set.
///
/// Paths are relative to the repository root.
pub trait VersionControl {
    /// Latest tag matching `v*`, or `None` when no tag exists or version
    /// control is unavailable.
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Files changed between `since` and the current revision, excluding
    /// files deleted since then.
    fn changed_files(&self, since: &str) -> Result<Vec<PathBuf>>;

    /// Files tracked under `root` at revision `rev`.
    fn files_at(&self, rev: &str, root: &Path) -> Result<Vec<PathBuf>>;

    /// Contents of `path` at revision `rev`.
    fn read_file_at(&self, rev: &str, path: &Path) -> Result<Vec<u8>>;
}

/// Per-file content hash used by the fingerprint.
pub trait ContentHasher {
    /// Lowercase hex digest of `bytes`.
    fn file_hash(&self, bytes: &[u8]) -> String;
}

/// SHA256 content hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl ContentHasher for Sha256Hasher {
    fn file_hash(&self, bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        hex::encode(hasher.finalize())
    }
}

/// In-memory version control for tests and dry runs.
///
/// Holds an optional latest tag, the changed-file listing against that tag,
/// and per-revision file trees.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVersionControl {
    latest_tag: Option<String>,
    changed: Vec<PathBuf>,
    trees: BTreeMap<String, BTreeMap<PathBuf, Vec<u8>>>,
}

impl InMemoryVersionControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.latest_tag = Some(tag.into());
        self
    }

    pub fn with_changed_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.changed = files.into_iter().map(Into::into).collect();
        self
    }

    /// Record `contents` for `path` at revision `rev`.
    pub fn with_file_at(
        mut self,
        rev: impl Into<String>,
        path: impl Into<PathBuf>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        self.trees
            .entry(rev.into())
            .or_default()
            .insert(path.into(), contents.into());
        self
    }

    fn tree(&self, rev: &str) -> Result<&BTreeMap<PathBuf, Vec<u8>>> {
        self.trees.get(rev).ok_or_else(|| {
            InfraverError::UnknownRevision {
                spec: rev.to_string(),
            }
            .into()
        })
    }
}

impl VersionControl for InMemoryVersionControl {
    fn latest_tag(&self) -> Result<Option<String>> {
        Ok(self.latest_tag.clone())
    }

    /// Only the recorded latest tag is a known revision.
    fn changed_files(&self, since: &str) -> Result<Vec<PathBuf>> {
        if self.latest_tag.as_deref() != Some(since) {
            return Err(InfraverError::UnknownRevision {
                spec: since.to_string(),
            }
            .into());
        }
        Ok(self.changed.clone())
    }

    fn files_at(&self, rev: &str, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .tree(rev)?
            .keys()
            .filter(|p| p.starts_with(root))
            .cloned()
            .collect())
    }

    fn read_file_at(&self, rev: &str, path: &Path) -> Result<Vec<u8>> {
        self.tree(rev)?.get(path).cloned().ok_or_else(|| {
            InfraverError::UnknownRevision {
                spec: format!("{}:{}", rev, path.display()),
            }
            .into()
        })
    }
}
