//! Engine-level commands for repository and version-control access.

use crate::commands::version::{determine_version, VersionOutcome, VersionRequest};
use infraver_core::errors::{ExError, ExErrorKind};
use infraver_core::{ContentHasher, ResourceTable, VersionControl};
use infraver_repo::errors::Result;
use infraver_repo::fs::parse_config_file;
use infraver_repo::snapshot::fingerprint_config_root;
use std::path::PathBuf;

/// Engine-level commands that require I/O (filesystem, version control).
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Classify changes since the reference tag and compute the next version.
    DetermineVersion(VersionRequest),
    /// Fingerprint the configuration files under a directory.
    Fingerprint { config_dir: PathBuf },
    /// Parse a single configuration file.
    ParseFile { path: PathBuf },
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Version(Box<VersionOutcome>),
    Fingerprint(String),
    Resources(ResourceTable),
}

impl EngineCommandResult {
    fn kind(&self) -> &'static str {
        match self {
            EngineCommandResult::Version(_) => "version",
            EngineCommandResult::Fingerprint(_) => "fingerprint",
            EngineCommandResult::Resources(_) => "resources",
        }
    }

    fn unexpected(&self, expected: &str) -> ExError {
        ExError::new(ExErrorKind::Internal)
            .with_op("apply_engine_command")
            .with_message(format!("expected {} result, got {}", expected, self.kind()))
    }

    /// # Errors
    ///
    /// `Internal` when the result is not a version outcome.
    pub fn into_version(self) -> Result<VersionOutcome> {
        match self {
            EngineCommandResult::Version(outcome) => Ok(*outcome),
            other => Err(other.unexpected("version")),
        }
    }

    /// # Errors
    ///
    /// `Internal` when the result is not a fingerprint.
    pub fn into_fingerprint(self) -> Result<String> {
        match self {
            EngineCommandResult::Fingerprint(fp) => Ok(fp),
            other => Err(other.unexpected("fingerprint")),
        }
    }

    /// # Errors
    ///
    /// `Internal` when the result is not a resource table.
    pub fn into_resources(self) -> Result<ResourceTable> {
        match self {
            EngineCommandResult::Resources(table) => Ok(table),
            other => Err(other.unexpected("resources")),
        }
    }
}

/// Apply an engine command against the given collaborators.
///
/// # Errors
///
/// Propagates the error of the underlying command.
pub fn apply_engine_command(
    cmd: EngineCommand,
    vcs: &dyn VersionControl,
    hasher: &dyn ContentHasher,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::DetermineVersion(request) => {
            let outcome = determine_version(&request, vcs, hasher)?;
            Ok(EngineCommandResult::Version(Box::new(outcome)))
        }
        EngineCommand::Fingerprint { config_dir } => {
            fingerprint_config_root(hasher, &config_dir).map(EngineCommandResult::Fingerprint)
        }
        EngineCommand::ParseFile { path } => {
            parse_config_file(&path).map(EngineCommandResult::Resources)
        }
    }
}
