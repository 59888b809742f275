use crate::model::identity::ResourceIdentity;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::collections::{btree_map, BTreeMap, BTreeSet};

/// Field name → raw value as written (trimmed, trailing commas stripped).
pub type FieldMap = BTreeMap<String, String>;

/// Mapping from resource identity to its fields.
///
/// Every identity present has a `FieldMap`, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTable {
    resources: BTreeMap<ResourceIdentity, FieldMap>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the fields of `identity`.
    pub fn insert(&mut self, identity: ResourceIdentity, fields: FieldMap) {
        self.resources.insert(identity, fields);
    }

    /// Merge `other` into `self`; entries from `other` win on conflict.
    pub fn merge(&mut self, other: ResourceTable) {
        self.resources.extend(other.resources);
    }

    pub fn get(&self, identity: &ResourceIdentity) -> Option<&FieldMap> {
        self.resources.get(identity)
    }

    pub(crate) fn get_mut(&mut self, identity: &ResourceIdentity) -> Option<&mut FieldMap> {
        self.resources.get_mut(identity)
    }

    pub fn contains(&self, identity: &ResourceIdentity) -> bool {
        self.resources.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn identities(&self) -> impl Iterator<Item = &ResourceIdentity> {
        self.resources.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ResourceIdentity, FieldMap> {
        self.resources.iter()
    }

    /// Distinct resource types present in the table.
    pub fn resource_types(&self) -> BTreeSet<&str> {
        self.resources
            .keys()
            .map(|id| id.resource_type.as_str())
            .collect()
    }

    /// Names declared under `resource_type`.
    pub fn names_of_type(&self, resource_type: &str) -> BTreeSet<&str> {
        self.resources
            .keys()
            .filter(|id| id.resource_type == resource_type)
            .map(|id| id.resource_name.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a ResourceTable {
    type Item = (&'a ResourceIdentity, &'a FieldMap);
    type IntoIter = btree_map::Iter<'a, ResourceIdentity, FieldMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}

impl FromIterator<(ResourceIdentity, FieldMap)> for ResourceTable {
    fn from_iter<I: IntoIterator<Item = (ResourceIdentity, FieldMap)>>(iter: I) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}

#[derive(Serialize)]
struct ResourceEntry<'a> {
    resource_type: &'a str,
    resource_name: &'a str,
    fields: &'a FieldMap,
}

/// JSON object keys must be strings, so the table serializes as a sorted
/// list of `{resource_type, resource_name, fields}` entries.
impl Serialize for ResourceTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.resources.len()))?;
        for (id, fields) in &self.resources {
            seq.serialize_element(&ResourceEntry {
                resource_type: &id.resource_type,
                resource_name: &id.resource_name,
                fields,
            })?;
        }
        seq.end()
    }
}
