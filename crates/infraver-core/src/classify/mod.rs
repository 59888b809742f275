//! Change classification.
//!
//! Compares the "new" resource table (files changed since the reference tag)
//! against the "existing" table and decides how far the version advances.
//!
//! ## Entry point
//!
//! ```
//! use infraver_core::classify::{classify_changes, render_human_summary};
//! use infraver_core::{parse_resources, Increment};
//!
//! let existing = parse_resources("resource \"aws_instance\" \"web\" {\n  ami = \"x\"\n}\n");
//! let new = parse_resources("resource \"aws_instance\" \"api\" {\n  ami = \"x\"\n}\n");
//!
//! let classification = classify_changes(&existing, &new);
//! assert_eq!(classification.increment, Increment::Minor);
//! assert!(render_human_summary(&classification).contains("minor"));
//! ```
//!
//! ## Predicates (first match wins)
//!
//! | Order | Predicate | Increment |
//! |---|---|---|
//! | 1 | new resource type | major |
//! | 2 | new instance of an existing type | minor |
//! | 3 | field added or removed on an existing resource | minor |
//! | 4 | field value changed on an existing resource | patch |
//! | - | nothing detected | patch |
//!
//! Predicates are pure functions of the two tables; callers build each
//! table once and share it across all four.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{
    classify_changes, is_field_set_changed, is_field_value_changed, is_new_resource_instance,
    is_new_resource_type,
};
pub use human_summary::render_human_summary;
pub use model::{ChangeClassification, ChangeKind, FieldSetChange, FieldValueChange};
