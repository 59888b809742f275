//! Version determination pipeline.
//!
//! ```text
//! latest_tag ─┬─> existing table ─┐
//!             └─> change set ─────┴─> classify ─> bump ─┐
//! config files ─> fingerprint ──────────────────────────┴─> v<M>.<m>.<p>-<fp>
//! ```

use infraver_core::digest::FINGERPRINT_LEN;
use infraver_core::version::compose_version;
use infraver_core::{classify_changes, log_op_end, log_op_error, log_op_start};
use infraver_core::{
    ChangeClassification, ContentHasher, Increment, ReferenceTag, ResourceTable,
    SemanticVersion, VersionControl,
};
use infraver_repo::changeset::relative_config_root;
use infraver_repo::errors::Result;
use infraver_repo::snapshot::fingerprint_config_root;
use infraver_repo::{build_change_set, build_reference_snapshot, build_repository_snapshot};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Source of the "existing" resource table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// Every configuration file in the working tree
    #[default]
    WorkingTree,
    /// Configuration files as committed at the reference tag
    Reference,
}

/// Inputs of one version determination.
#[derive(Debug, Clone)]
pub struct VersionRequest {
    /// Repository root; version-control paths are relative to it
    pub repo_root: PathBuf,
    /// Configuration root, relative to `repo_root` or absolute
    pub config_root: PathBuf,
    pub baseline: Baseline,
}

impl VersionRequest {
    pub fn new(repo_root: impl Into<PathBuf>, config_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            config_root: config_root.into(),
            baseline: Baseline::default(),
        }
    }

    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Configuration root as a working-tree path.
    pub fn config_dir(&self) -> PathBuf {
        self.repo_root.join(&self.config_root)
    }
}

/// Everything decided during one run.
#[derive(Debug, Clone, Serialize)]
pub struct VersionOutcome {
    pub reference_tag: ReferenceTag,
    pub baseline: Baseline,
    pub previous: SemanticVersion,
    pub increment: Increment,
    pub classification: ChangeClassification,
    pub next: SemanticVersion,
    pub fingerprint: String,
    pub version: String,
}

/// Build the "existing" table for the requested baseline.
fn existing_table<V>(
    request: &VersionRequest,
    reference: &ReferenceTag,
    vcs: &V,
) -> Result<ResourceTable>
where
    V: VersionControl + ?Sized,
{
    match (request.baseline, reference) {
        (Baseline::WorkingTree, _) => build_repository_snapshot(&request.config_dir()),
        (Baseline::Reference, ReferenceTag::Tagged(tag)) => build_reference_snapshot(
            vcs,
            tag,
            &relative_config_root(&request.repo_root, &request.config_root)?,
        ),
        (Baseline::Reference, ReferenceTag::Initial) => Ok(ResourceTable::new()),
    }
}

/// Classify the changes since the reference tag and compute the next version.
///
/// # Errors
///
/// - `NotFound`: the configuration root is not a directory
/// - `InvalidInput`: the configuration root is outside the repository
/// - `Io` / `InvalidEncoding`: a configuration file could not be read
/// - `VersionControl` / `Timeout`: listing changed files failed
pub fn determine_version<V, H>(request: &VersionRequest, vcs: &V, hasher: &H) -> Result<VersionOutcome>
where
    V: VersionControl + ?Sized,
    H: ContentHasher + ?Sized,
{
    let start = Instant::now();
    log_op_start!(
        "determine_version",
        config_root = %request.config_root.display()
    );

    let result = determine_version_inner(request, vcs, hasher);

    match &result {
        Ok(outcome) => log_op_end!(
            "determine_version",
            duration_ms = start.elapsed().as_millis() as u64,
            reference_tag = outcome.reference_tag.as_str(),
            increment = outcome.increment.as_str(),
            version = outcome.version.as_str()
        ),
        Err(err) => log_op_error!(
            "determine_version",
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        ),
    }

    result
}

fn determine_version_inner<V, H>(
    request: &VersionRequest,
    vcs: &V,
    hasher: &H,
) -> Result<VersionOutcome>
where
    V: VersionControl + ?Sized,
    H: ContentHasher + ?Sized,
{
    let reference = ReferenceTag::from_latest(vcs.latest_tag()?);
    tracing::info!(
        op = "determine_version",
        reference_tag = reference.as_str(),
        "resolved reference tag"
    );

    let existing = existing_table(request, &reference, vcs)?;
    let new = build_change_set(vcs, &reference, &request.repo_root, &request.config_root)?;
    let classification = classify_changes(&existing, &new);

    let previous = SemanticVersion::from_tag(reference.as_str());
    let next = previous.bump(classification.increment);

    let fingerprint = fingerprint_config_root(hasher, &request.config_dir())?;
    debug_assert_eq!(fingerprint.len(), FINGERPRINT_LEN);
    let version = compose_version(next, &fingerprint);

    Ok(VersionOutcome {
        increment: classification.increment,
        reference_tag: reference,
        baseline: request.baseline,
        previous,
        classification,
        next,
        fingerprint,
        version,
    })
}
