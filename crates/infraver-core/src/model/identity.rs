use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a resource block: `resource "<type>" "<name>" { ... }`.
///
/// Ordered by type, then name, so tables iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceIdentity {
    pub resource_type: String,
    pub resource_name: String,
}

impl ResourceIdentity {
    pub fn new(resource_type: impl Into<String>, resource_name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_name: resource_name.into(),
        }
    }
}

/// Renders the address form `type.name`.
impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource_type, self.resource_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_address_form() {
        let id = ResourceIdentity::new("aws_instance", "web");
        assert_eq!(id.to_string(), "aws_instance.web");
    }

    #[test]
    fn test_ordering_is_type_then_name() {
        let a = ResourceIdentity::new("aws_instance", "z");
        let b = ResourceIdentity::new("aws_s3_bucket", "a");
        let c = ResourceIdentity::new("aws_instance", "a");
        let mut ids = vec![a.clone(), b.clone(), c.clone()];
        ids.sort();
        assert_eq!(ids, vec![c, a, b]);
    }
}
