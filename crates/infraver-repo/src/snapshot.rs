//! Repository snapshot: the "existing" resource table.
//!
//! Files are merged in sorted path order, so when one identity is declared
//! in several files the lexicographically last file wins on every platform.

use crate::errors::{missing_root, walk_error, Result};
use crate::fs::{decode_config, has_config_extension, normalize_path, parse_config_file, read_config_bytes};
use infraver_core::digest::compute_fingerprint;
use infraver_core::{log_op_end, log_op_start, parse_resources};
use infraver_core::{ContentHasher, ResourceTable, VersionControl};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Every configuration file under `root`, sorted by path.
///
/// # Errors
///
/// - `NotFound`: `root` is not a directory
/// - `Io`: the walk could not read a directory
pub fn collect_config_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(missing_root(root));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        let path = entry.path();
        if path.is_file() && has_config_extension(path) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Parse every configuration file under `root` into one table.
///
/// # Errors
///
/// Any unreadable or non-UTF-8 file aborts the snapshot.
pub fn build_repository_snapshot(root: &Path) -> Result<ResourceTable> {
    let start = Instant::now();
    log_op_start!("build_repository_snapshot", config_root = %root.display());

    let files = collect_config_files(root)?;
    let mut table = ResourceTable::new();
    for path in &files {
        table.merge(parse_config_file(path)?);
    }

    log_op_end!(
        "build_repository_snapshot",
        duration_ms = start.elapsed().as_millis() as u64,
        file_count = files.len() as u64,
        resource_count = table.len() as u64
    );
    Ok(table)
}

/// Parse the configuration files under `config_root` as they were at `rev`.
///
/// `config_root` is relative to the repository root.
pub fn build_reference_snapshot<V>(vcs: &V, rev: &str, config_root: &Path) -> Result<ResourceTable>
where
    V: VersionControl + ?Sized,
{
    let start = Instant::now();
    log_op_start!("build_reference_snapshot", reference_tag = rev, config_root = %config_root.display());

    let mut files: Vec<PathBuf> = vcs
        .files_at(rev, &normalize_path(config_root))?
        .into_iter()
        .filter(|p| has_config_extension(p))
        .collect();
    files.sort();

    let mut table = ResourceTable::new();
    for path in &files {
        let text = decode_config(path, vcs.read_file_at(rev, path)?)?;
        table.merge(parse_resources(&text));
    }

    log_op_end!(
        "build_reference_snapshot",
        duration_ms = start.elapsed().as_millis() as u64,
        file_count = files.len() as u64,
        resource_count = table.len() as u64
    );
    Ok(table)
}

/// Fingerprint the bytes of every configuration file under `root`.
pub fn fingerprint_config_root<H>(hasher: &H, root: &Path) -> Result<String>
where
    H: ContentHasher + ?Sized,
{
    let files = collect_config_files(root)?
        .into_iter()
        .map(|path| {
            let bytes = read_config_bytes(&path)?;
            Ok((path, bytes))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(compute_fingerprint(hasher, files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use infraver_core::{ExErrorKind, InMemoryVersionControl, ResourceIdentity};

    #[test]
    fn test_missing_root_is_not_found() {
        let err = collect_config_files(Path::new("/definitely/not/here")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }

    #[test]
    fn test_reference_snapshot_reads_tree_at_revision() {
        let vcs = InMemoryVersionControl::new()
            .with_tag("v1.0.0")
            .with_file_at(
                "v1.0.0",
                "infra/main.tf",
                "resource \"aws_instance\" \"web\" {\n  ami = \"x\"\n}\n",
            )
            .with_file_at("v1.0.0", "infra/README.md", "resource \"ignored\" \"x\" {\n}\n")
            .with_file_at("v1.0.0", "other/main.tf", "resource \"elsewhere\" \"x\" {\n}\n");

        let table = build_reference_snapshot(&vcs, "v1.0.0", Path::new("./infra")).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.contains(&ResourceIdentity::new("aws_instance", "web")));
    }

    #[test]
    fn test_reference_snapshot_rejects_non_utf8() {
        let vcs = InMemoryVersionControl::new().with_file_at("v1.0.0", "infra/bad.tf", vec![0xffu8]);
        let err = build_reference_snapshot(&vcs, "v1.0.0", Path::new("infra")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidEncoding);
    }
}
