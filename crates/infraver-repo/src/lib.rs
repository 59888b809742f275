//! infraver repository access
//!
//! Filesystem and version-control side of infraver:
//! - Strict reading of configuration files
//! - Repository snapshot (working tree or reference revision)
//! - Change set since the reference tag
//! - `git` command-line collaborator with bounded waits
//! - CI step-output and environment-file writers

pub mod changeset;
pub mod ci;
pub mod errors;
pub mod fs;
pub mod git;
pub mod snapshot;

pub use changeset::build_change_set;
pub use git::GitCli;
pub use snapshot::{build_reference_snapshot, build_repository_snapshot, collect_config_files};
