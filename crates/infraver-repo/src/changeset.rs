//! Change set: the "new" resource table.
//!
//! Configuration files changed between the reference tag and `HEAD`, read
//! from the working tree and merged in sorted path order.

use crate::errors::{config_root_outside_repo, Result};
use crate::fs::{has_config_extension, normalize_path, parse_config_file};
use infraver_core::{log_op_end, log_op_start};
use infraver_core::{ReferenceTag, ResourceTable, VersionControl};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Express `config_root` relative to `repo_root`, the form version control
/// reports paths in.
///
/// Both roots are canonicalized when they exist, so an absolute
/// configuration root still lines up with a relative repository root such
/// as `.`.
///
/// # Errors
///
/// `InvalidInput`: `config_root` resolves outside `repo_root`.
pub fn relative_config_root(repo_root: &Path, config_root: &Path) -> Result<PathBuf> {
    let joined = repo_root.join(config_root);
    if let (Ok(repo), Ok(config)) = (repo_root.canonicalize(), joined.canonicalize()) {
        return config
            .strip_prefix(&repo)
            .map(Path::to_path_buf)
            .map_err(|_| config_root_outside_repo(config_root, repo_root));
    }

    let config_root = normalize_path(config_root);
    if !config_root.is_absolute() {
        return Ok(config_root);
    }
    config_root
        .strip_prefix(normalize_path(repo_root))
        .map(Path::to_path_buf)
        .map_err(|_| config_root_outside_repo(&config_root, repo_root))
}

/// Keep changed paths under `config_root` that name configuration files,
/// sorted and deduplicated.
pub fn filter_config_changes(changed: Vec<PathBuf>, config_root: &Path) -> Vec<PathBuf> {
    let config_root = normalize_path(config_root);
    let mut files: Vec<PathBuf> = changed
        .into_iter()
        .map(|p| normalize_path(&p))
        .filter(|p| p.starts_with(&config_root) && has_config_extension(p))
        .collect();
    files.sort();
    files.dedup();
    files
}

/// Parse the configuration files changed since `reference`.
///
/// With no reference tag there is no revision to diff against, so the
/// change set is empty.
///
/// # Errors
///
/// - `InvalidInput`: the configuration root is outside the repository
/// - `VersionControl` / `Timeout`: listing changed files failed
/// - `Io` / `InvalidEncoding`: a changed file could not be read
pub fn build_change_set<V>(
    vcs: &V,
    reference: &ReferenceTag,
    repo_root: &Path,
    config_root: &Path,
) -> Result<ResourceTable>
where
    V: VersionControl + ?Sized,
{
    let start = Instant::now();
    log_op_start!("build_change_set", reference_tag = reference.as_str());

    let ReferenceTag::Tagged(tag) = reference else {
        tracing::warn!(
            op = "build_change_set",
            reference_tag = reference.as_str(),
            "no version tag found; change set is empty"
        );
        log_op_end!(
            "build_change_set",
            duration_ms = start.elapsed().as_millis() as u64,
            file_count = 0u64,
            resource_count = 0u64
        );
        return Ok(ResourceTable::new());
    };

    let relative_root = relative_config_root(repo_root, config_root)?;
    let files = filter_config_changes(vcs.changed_files(tag)?, &relative_root);

    let mut table = ResourceTable::new();
    for path in &files {
        table.merge(parse_config_file(&repo_root.join(path))?);
    }

    log_op_end!(
        "build_change_set",
        duration_ms = start.elapsed().as_millis() as u64,
        file_count = files.len() as u64,
        resource_count = table.len() as u64
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_config_files_under_root() {
        let changed = vec![
            PathBuf::from("infra/b.tf"),
            PathBuf::from("infra/a.tf"),
            PathBuf::from("infra/vars.tfvars"),
            PathBuf::from("infrastructure/c.tf"),
            PathBuf::from("docs/d.tf"),
            PathBuf::from("infra/a.tf"),
        ];

        assert_eq!(
            filter_config_changes(changed, Path::new("./infra")),
            vec![PathBuf::from("infra/a.tf"), PathBuf::from("infra/b.tf")]
        );
    }

    #[test]
    fn test_relative_config_root() {
        assert_eq!(
            relative_config_root(Path::new("/repo"), Path::new("/repo/infra/prod")).unwrap(),
            PathBuf::from("infra/prod")
        );
        assert_eq!(
            relative_config_root(Path::new("."), Path::new("./infra")).unwrap(),
            PathBuf::from("infra")
        );
    }

    #[test]
    fn test_absolute_config_root_under_current_dir() {
        let absolute = std::env::current_dir().unwrap().join("src");

        assert_eq!(
            relative_config_root(Path::new("."), &absolute).unwrap(),
            PathBuf::from("src")
        );
    }

    #[test]
    fn test_config_root_outside_repo_is_rejected() {
        let repo = tempfile::TempDir::new().unwrap();
        let elsewhere = tempfile::TempDir::new().unwrap();

        let err = relative_config_root(repo.path(), elsewhere.path()).unwrap_err();
        assert_eq!(err.kind(), infraver_core::ExErrorKind::InvalidInput);

        let err = relative_config_root(Path::new("/repo"), Path::new("/other/infra")).unwrap_err();
        assert_eq!(err.kind(), infraver_core::ExErrorKind::InvalidInput);
    }
}
