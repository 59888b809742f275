//! infraver core - change classification kernel
//!
//! This crate provides the pure logic behind infraver:
//! - Resource identity / field map / resource table model
//! - The line-based resource block parser
//! - The four ordered change-classification predicates
//! - Semantic version parsing, bumping and composition
//! - Content fingerprinting over configuration files
//! - Collaborator traits for version control and hashing, with in-memory fakes
//! - The structured error facility and the logging facility
//!
//! Filesystem and subprocess access live in `infraver-repo`.

pub mod classify;
pub mod collaborators;
pub mod digest;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod parser;
pub mod version;

// Re-export commonly used types
pub use classify::{classify_changes, ChangeClassification, ChangeKind};
pub use collaborators::{ContentHasher, InMemoryVersionControl, Sha256Hasher, VersionControl};
pub use errors::{ExError, ExErrorKind, InfraverError, Result};
pub use model::{FieldMap, ResourceIdentity, ResourceTable};
pub use parser::parse_resources;
pub use version::{Increment, ReferenceTag, SemanticVersion};
