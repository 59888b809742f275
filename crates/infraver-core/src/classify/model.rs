//! Classification output types.
//!
//! Evidence lists are sorted so serialized output is deterministic.

use crate::model::ResourceIdentity;
use crate::version::Increment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The predicate that decided the increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    NewResourceType,
    NewResourceInstance,
    FieldSetChanged,
    FieldValueChanged,
    /// No predicate fired; patch by default
    NoChange,
}

impl ChangeKind {
    pub fn increment(&self) -> Increment {
        match self {
            ChangeKind::NewResourceType => Increment::Major,
            ChangeKind::NewResourceInstance | ChangeKind::FieldSetChanged => Increment::Minor,
            ChangeKind::FieldValueChanged | ChangeKind::NoChange => Increment::Patch,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::NewResourceType => "new_resource_type",
            ChangeKind::NewResourceInstance => "new_resource_instance",
            ChangeKind::FieldSetChanged => "field_set_changed",
            ChangeKind::FieldValueChanged => "field_value_changed",
            ChangeKind::NoChange => "no_change",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of comparing the "new" table against the "existing" table.
///
/// All evidence lists are populated even when an earlier predicate already
/// decided the increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeClassification {
    pub increment: Increment,
    pub trigger: ChangeKind,
    /// Types in "new" absent from "existing"
    pub new_resource_types: Vec<String>,
    /// New names under a type both tables declare
    pub new_resource_instances: Vec<ResourceIdentity>,
    /// Resources in both tables whose field names differ
    pub field_set_changes: Vec<FieldSetChange>,
    /// Shared fields whose values differ
    pub field_value_changes: Vec<FieldValueChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSetChange {
    pub identity: ResourceIdentity,
    /// Fields in "new" but not "existing"
    pub added_fields: Vec<String>,
    /// Fields in "existing" but not "new"
    pub removed_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValueChange {
    pub identity: ResourceIdentity,
    pub field: String,
    pub old_value: String,
    pub new_value: String,
}
