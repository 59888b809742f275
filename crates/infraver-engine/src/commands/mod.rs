//! Command orchestration layer.

pub mod engine_command;
pub mod version;

pub use engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use version::{determine_version, Baseline, VersionOutcome, VersionRequest};
