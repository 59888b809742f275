//! Content fingerprint over the configuration files.
//!
//! ## Algorithm
//!
//! 1. Sort files by path
//! 2. Hash each file's bytes (hex)
//! 3. Hash the concatenation of those hex digests
//! 4. Keep the first [`FINGERPRINT_LEN`] hex characters
//!
//! The fingerprint depends only on the file contents and their path order,
//! never on timestamps or the order files were discovered in.

use crate::collaborators::ContentHasher;
use std::path::PathBuf;

/// Number of hex characters kept from the hash-of-hashes.
pub const FINGERPRINT_LEN: usize = 8;

/// Compute the fingerprint of `(path, contents)` pairs.
///
/// ```
/// use infraver_core::digest::compute_fingerprint;
/// use infraver_core::Sha256Hasher;
/// use std::path::PathBuf;
///
/// let files = vec![(PathBuf::from("main.tf"), b"resource".to_vec())];
/// let fp = compute_fingerprint(&Sha256Hasher, files);
/// assert_eq!(fp.len(), 8);
/// ```
pub fn compute_fingerprint<H>(hasher: &H, mut files: Vec<(PathBuf, Vec<u8>)>) -> String
where
    H: ContentHasher + ?Sized,
{
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let concatenated: String = files
        .iter()
        .map(|(_, contents)| hasher.file_hash(contents))
        .collect();

    let mut digest = hasher.file_hash(concatenated.as_bytes());
    digest.truncate(FINGERPRINT_LEN);
    digest
}
