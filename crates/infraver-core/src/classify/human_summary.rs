//! Human-readable summary renderer for change classifications.

use crate::classify::model::{ChangeClassification, ChangeKind};

/// Render a Markdown summary of a [`ChangeClassification`].
///
/// Informational only; intended for job summaries and local review.
pub fn render_human_summary(classification: &ChangeClassification) -> String {
    let mut out = String::new();

    out.push_str("## Infrastructure Change Classification\n\n");

    let trigger_label = match classification.trigger {
        ChangeKind::NewResourceType => "New resource type",
        ChangeKind::NewResourceInstance => "New resource instance",
        ChangeKind::FieldSetChanged => "Field set changed",
        ChangeKind::FieldValueChanged => "Field value changed",
        ChangeKind::NoChange => "No classified change",
    };
    out.push_str(&format!(
        "**Increment**: {}  \n**Trigger**: {trigger_label}\n\n",
        classification.increment
    ));

    if classification.trigger == ChangeKind::NoChange {
        out.push_str("_No resource-level changes detected._\n");
        return out;
    }

    if !classification.new_resource_types.is_empty() {
        out.push_str(&format!(
            "- **New resource types** ({}): {}\n",
            classification.new_resource_types.len(),
            classification.new_resource_types.join(", ")
        ));
    }

    if !classification.new_resource_instances.is_empty() {
        let ids: Vec<String> = classification
            .new_resource_instances
            .iter()
            .map(|id| format!("`{}`", id))
            .collect();
        out.push_str(&format!(
            "- **New resource instances** ({}): {}\n",
            ids.len(),
            ids.join(", ")
        ));
    }

    for change in &classification.field_set_changes {
        out.push_str(&format!("- `{}` fields changed", change.identity));
        if !change.added_fields.is_empty() {
            out.push_str(&format!(" (+{})", change.added_fields.join(", +")));
        }
        if !change.removed_fields.is_empty() {
            out.push_str(&format!(" (-{})", change.removed_fields.join(", -")));
        }
        out.push('\n');
    }

    for change in &classification.field_value_changes {
        out.push_str(&format!(
            "- `{}.{}`: `{}` → `{}`\n",
            change.identity, change.field, change.old_value, change.new_value
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::model::{FieldSetChange, FieldValueChange};
    use crate::model::ResourceIdentity;
    use crate::version::Increment;

    fn empty(trigger: ChangeKind) -> ChangeClassification {
        ChangeClassification {
            increment: trigger.increment(),
            trigger,
            new_resource_types: vec![],
            new_resource_instances: vec![],
            field_set_changes: vec![],
            field_value_changes: vec![],
        }
    }

    #[test]
    fn test_no_change_summary() {
        let summary = render_human_summary(&empty(ChangeKind::NoChange));
        assert!(summary.contains("**Increment**: patch"));
        assert!(summary.contains("No resource-level changes detected"));
    }

    #[test]
    fn test_summary_lists_evidence() {
        let mut c = empty(ChangeKind::FieldSetChanged);
        c.field_set_changes.push(FieldSetChange {
            identity: ResourceIdentity::new("aws_instance", "web"),
            added_fields: vec!["monitoring".into()],
            removed_fields: vec!["ebs_optimized".into()],
        });
        c.field_value_changes.push(FieldValueChange {
            identity: ResourceIdentity::new("aws_instance", "web"),
            field: "ami".into(),
            old_value: "\"x\"".into(),
            new_value: "\"y\"".into(),
        });

        let summary = render_human_summary(&c);
        assert_eq!(c.increment, Increment::Minor);
        assert!(summary.contains("**Trigger**: Field set changed"));
        assert!(summary.contains("`aws_instance.web` fields changed (+monitoring) (-ebs_optimized)"));
        assert!(summary.contains("`aws_instance.web.ami`: `\"x\"` → `\"y\"`"));
    }
}
