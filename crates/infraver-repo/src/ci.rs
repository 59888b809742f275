//! CI output channels.
//!
//! The computed version is published three ways:
//! - a `::set-output` workflow command on stdout
//! - `new_version=<version>` appended to the step-output file, when the
//!   runner provides one
//! - `NEW_VERSION=<version>` appended to the environment file

use crate::errors::{io_error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Step output name carrying the version.
pub const STEP_OUTPUT_NAME: &str = "new_version";

/// Environment variable exported to later steps.
pub const ENV_VAR_NAME: &str = "NEW_VERSION";

/// Environment variable naming the environment file.
pub const GITHUB_ENV: &str = "GITHUB_ENV";

/// Environment variable naming the step-output file.
pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Write the `::set-output` workflow command.
pub fn write_step_output<W: Write>(out: &mut W, version: &str) -> std::io::Result<()> {
    writeln!(out, "::set-output name={}::{}", STEP_OUTPUT_NAME, version)
}

/// Append `new_version=<version>` to the step-output file.
pub fn append_output_file(path: &Path, version: &str) -> Result<()> {
    append_line(path, &format!("{}={}", STEP_OUTPUT_NAME, version))
}

/// Append `NEW_VERSION=<version>` to the environment file.
pub fn append_env_file(path: &Path, version: &str) -> Result<()> {
    append_line(path, &format!("{}={}", ENV_VAR_NAME, version))
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| io_error("append_ci_file", path, e))?;
    writeln!(file, "{}", line).map_err(|e| io_error("append_ci_file", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_step_output_format() {
        let mut out = Vec::new();
        write_step_output(&mut out, "v1.3.0-deadbeef").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "::set-output name=new_version::v1.3.0-deadbeef\n"
        );
    }

    #[test]
    fn test_env_file_is_appended() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_env");
        std::fs::write(&path, "EXISTING=1\n").unwrap();

        append_env_file(&path, "v1.3.0-deadbeef").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "EXISTING=1\nNEW_VERSION=v1.3.0-deadbeef\n"
        );
    }

    #[test]
    fn test_output_file_is_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_output");

        append_output_file(&path, "v0.0.1-e3b0c442").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "new_version=v0.0.1-e3b0c442\n"
        );
    }

    #[test]
    fn test_unwritable_env_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = append_env_file(&dir.path().join("missing/dir/env"), "v1.0.0-x").unwrap_err();
        assert_eq!(err.kind(), infraver_core::ExErrorKind::Io);
    }
}
