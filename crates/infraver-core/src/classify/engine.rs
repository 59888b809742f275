//! Classification predicates.
//!
//! The core entry point is [`classify_changes`]. Each `is_*` predicate is
//! also exposed on its own and answers independently of the others.

use crate::classify::model::{ChangeClassification, ChangeKind, FieldSetChange, FieldValueChange};
use crate::model::{ResourceIdentity, ResourceTable};
use crate::{log_op_end, log_op_start};
use std::collections::BTreeSet;
use std::time::Instant;

/// Types declared in `new` that no identity in `existing` declares.
fn new_resource_types(existing: &ResourceTable, new: &ResourceTable) -> Vec<String> {
    let known = existing.resource_types();
    new.resource_types()
        .into_iter()
        .filter(|t| !known.contains(t))
        .map(str::to_string)
        .collect()
}

/// Names in `new` under a type that `existing` also declares, absent from
/// `existing` for that type.
fn new_resource_instances(existing: &ResourceTable, new: &ResourceTable) -> Vec<ResourceIdentity> {
    let known_types = existing.resource_types();
    let mut instances = Vec::new();
    for resource_type in new.resource_types() {
        if !known_types.contains(resource_type) {
            continue;
        }
        let known_names = existing.names_of_type(resource_type);
        for name in new.names_of_type(resource_type) {
            if !known_names.contains(name) {
                instances.push(ResourceIdentity::new(resource_type, name));
            }
        }
    }
    instances
}

fn field_set_changes(existing: &ResourceTable, new: &ResourceTable) -> Vec<FieldSetChange> {
    new.iter()
        .filter_map(|(identity, new_fields)| {
            let old_fields = existing.get(identity)?;
            let old_keys: BTreeSet<&String> = old_fields.keys().collect();
            let new_keys: BTreeSet<&String> = new_fields.keys().collect();
            if old_keys == new_keys {
                return None;
            }
            Some(FieldSetChange {
                identity: identity.clone(),
                added_fields: new_keys.difference(&old_keys).map(|k| k.to_string()).collect(),
                removed_fields: old_keys.difference(&new_keys).map(|k| k.to_string()).collect(),
            })
        })
        .collect()
}

fn field_value_changes(existing: &ResourceTable, new: &ResourceTable) -> Vec<FieldValueChange> {
    let mut changes = Vec::new();
    for (identity, new_fields) in new {
        let Some(old_fields) = existing.get(identity) else {
            continue;
        };
        for (field, new_value) in new_fields {
            match old_fields.get(field) {
                Some(old_value) if old_value != new_value => changes.push(FieldValueChange {
                    identity: identity.clone(),
                    field: field.clone(),
                    old_value: old_value.clone(),
                    new_value: new_value.clone(),
                }),
                _ => {}
            }
        }
    }
    changes
}

/// True if any resource type in `new` is absent from `existing`.
pub fn is_new_resource_type(existing: &ResourceTable, new: &ResourceTable) -> bool {
    !new_resource_types(existing, new).is_empty()
}

/// True if a type present in both tables gains a name in `new`.
pub fn is_new_resource_instance(existing: &ResourceTable, new: &ResourceTable) -> bool {
    !new_resource_instances(existing, new).is_empty()
}

/// True if a resource present in both tables has a different set of field names.
pub fn is_field_set_changed(existing: &ResourceTable, new: &ResourceTable) -> bool {
    !field_set_changes(existing, new).is_empty()
}

/// True if a field shared by a resource in both tables has a different value.
pub fn is_field_value_changed(existing: &ResourceTable, new: &ResourceTable) -> bool {
    !field_value_changes(existing, new).is_empty()
}

/// Classify the change from `existing` to `new`.
///
/// The trigger is the first predicate, in priority order, with evidence;
/// with no evidence at all the result is a patch with
/// [`ChangeKind::NoChange`].
pub fn classify_changes(existing: &ResourceTable, new: &ResourceTable) -> ChangeClassification {
    let start = Instant::now();
    log_op_start!(
        "classify_changes",
        existing_count = existing.len() as u64,
        new_count = new.len() as u64
    );

    let new_resource_types = new_resource_types(existing, new);
    let new_resource_instances = new_resource_instances(existing, new);
    let field_set_changes = field_set_changes(existing, new);
    let field_value_changes = field_value_changes(existing, new);

    let trigger = if !new_resource_types.is_empty() {
        ChangeKind::NewResourceType
    } else if !new_resource_instances.is_empty() {
        ChangeKind::NewResourceInstance
    } else if !field_set_changes.is_empty() {
        ChangeKind::FieldSetChanged
    } else if !field_value_changes.is_empty() {
        ChangeKind::FieldValueChanged
    } else {
        ChangeKind::NoChange
    };

    let classification = ChangeClassification {
        increment: trigger.increment(),
        trigger,
        new_resource_types,
        new_resource_instances,
        field_set_changes,
        field_value_changes,
    };

    log_op_end!(
        "classify_changes",
        duration_ms = start.elapsed().as_millis() as u64,
        increment = classification.increment.as_str(),
        trigger = classification.trigger.as_str()
    );

    classification
}
