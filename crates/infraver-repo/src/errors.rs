//! Error handling for infraver-repo
//!
//! Wraps infraver-core ExError with repository-specific helpers

use infraver_core::errors::{ExError, ExErrorKind, InfraverError};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error for `path`
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a configuration file read error for `path`
pub fn read_error(path: &Path, err: &std::io::Error) -> ExError {
    InfraverError::ConfigRead {
        path: path.display().to_string(),
        message: err.to_string(),
    }
    .into()
}

/// Create a configuration root error for a root outside the repository
pub fn config_root_outside_repo(config_root: &Path, repo_root: &Path) -> ExError {
    InfraverError::ConfigRootOutsideRepo {
        config_root: config_root.display().to_string(),
        repo_root: repo_root.display().to_string(),
    }
    .into()
}

/// Create a UTF-8 decode error for `path`
pub fn decode_error(path: &Path) -> ExError {
    InfraverError::InvalidUtf8 {
        path: path.display().to_string(),
    }
    .into()
}

/// Create a directory walk error
pub fn walk_error(root: &Path, err: walkdir::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op("collect_config_files")
        .with_path(root.display().to_string())
        .with_message(err.to_string())
}

/// Create a missing configuration root error
pub fn missing_root(root: &Path) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("collect_config_files")
        .with_path(root.display().to_string())
        .with_message("configuration root is not a directory")
}

/// Create a version-control command error
pub fn vcs_error(command: &str, message: &str) -> ExError {
    InfraverError::VcsCommand {
        command: command.to_string(),
        message: message.to_string(),
    }
    .into()
}

/// Create a version-control timeout error
pub fn vcs_timeout(command: &str, timeout_secs: u64) -> ExError {
    InfraverError::VcsTimeout {
        command: command.to_string(),
        timeout_secs,
    }
    .into()
}

/// Create a missing environment variable error
pub fn missing_env(name: &str) -> ExError {
    InfraverError::MissingEnv {
        name: name.to_string(),
    }
    .into()
}
