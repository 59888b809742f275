//! Strict configuration file access.
//!
//! A file that cannot be read or is not valid UTF-8 aborts the run: a corrupt
//! or binary file must not silently drop out of the version calculation.

use crate::errors::{decode_error, read_error, Result};
use infraver_core::{parse_resources, ResourceTable};
use std::path::{Component, Path, PathBuf};

/// File name suffix of tracked configuration files.
pub const CONFIG_EXTENSION: &str = ".tf";

/// True if the file name ends in [`CONFIG_EXTENSION`].
pub fn has_config_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(CONFIG_EXTENSION))
}

/// Drop `.` components so `./infra` and `infra` compare equal.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Read a configuration file's raw bytes.
pub fn read_config_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        let err = read_error(path, &e);
        tracing::error!(
            op = "read_config_file",
            path = %path.display(),
            err.code = err.code(),
            "unable to read configuration file"
        );
        err
    })
}

/// Decode bytes read from `path` as strict UTF-8.
pub fn decode_config(path: &Path, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| {
        let err = decode_error(path);
        tracing::error!(
            op = "read_config_file",
            path = %path.display(),
            err.code = err.code(),
            "unable to decode configuration file as UTF-8"
        );
        err
    })
}

/// Read a configuration file with strict UTF-8 decoding.
pub fn read_config_file(path: &Path) -> Result<String> {
    decode_config(path, read_config_bytes(path)?)
}

/// Read and parse one configuration file.
pub fn parse_config_file(path: &Path) -> Result<ResourceTable> {
    Ok(parse_resources(&read_config_file(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use infraver_core::ExErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_extension_matching() {
        assert!(has_config_extension(Path::new("infra/main.tf")));
        assert!(!has_config_extension(Path::new("infra/main.tf.json")));
        assert!(!has_config_extension(Path::new("infra/terraform.tfvars")));
        assert!(!has_config_extension(Path::new("infra")));
    }

    #[test]
    fn test_normalize_drops_cur_dir() {
        assert_eq!(normalize_path(Path::new("./infra/./prod")), PathBuf::from("infra/prod"));
    }

    #[test]
    fn test_invalid_utf8_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.tf");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = read_config_file(&path).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidEncoding);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = read_config_file(&dir.path().join("absent.tf")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.op(), Some("read_config_file"));
        assert!(err.path().unwrap().ends_with("absent.tf"));
        assert!(err.message().starts_with("Failed to read configuration file"));
    }
}
