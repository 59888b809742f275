//! Line-based resource block parser.
//!
//! Recognises exactly one level of nesting:
//!
//! ```text
//! resource "aws_instance" "web" {
//!   ami           = "ami-123",
//!   instance_type = "t3.micro"
//! }
//! ```
//!
//! ## Known limitations
//!
//! - A nested block opener such as `tags = {` is stored as the field
//!   `tags` with value `{`, and the first inner `}` closes the resource.
//! - A block with no closing brace stays open until the end of the text.
//! - Lists and multi-line expressions are not understood.

use crate::model::{FieldMap, ResourceIdentity, ResourceTable};
use regex::Regex;
use std::sync::LazyLock;

static RESOURCE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^resource\s+"(\w+)"\s+"(\w+)"\s*\{"#).expect("Invalid regex")
});

/// Parse every resource block of one configuration file.
///
/// Single pass over the lines with an explicit cursor on the open block.
/// Re-declaring an identity replaces its fields; re-assigning a field
/// replaces its value.
///
/// ```
/// use infraver_core::{parse_resources, ResourceIdentity};
///
/// let table = parse_resources("resource \"aws_instance\" \"web\" {\n  ami = \"x\",\n}\n");
/// let fields = table.get(&ResourceIdentity::new("aws_instance", "web")).unwrap();
/// assert_eq!(fields.get("ami").map(String::as_str), Some("\"x\""));
/// ```
pub fn parse_resources(content: &str) -> ResourceTable {
    let mut table = ResourceTable::new();
    let mut cursor: Option<ResourceIdentity> = None;

    for line in content.lines() {
        if let Some(caps) = RESOURCE_HEADER.captures(line) {
            let identity = ResourceIdentity::new(&caps[1], &caps[2]);
            table.insert(identity.clone(), FieldMap::new());
            cursor = Some(identity);
        } else if let (Some(identity), Some((field, value))) = (&cursor, line.split_once('=')) {
            if let Some(fields) = table.get_mut(identity) {
                fields.insert(
                    field.trim().to_string(),
                    value.trim().trim_end_matches(',').to_string(),
                );
            }
        } else if line.trim() == "}" {
            cursor = None;
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(table: &'a ResourceTable, t: &str, n: &str, key: &str) -> Option<&'a str> {
        table
            .get(&ResourceIdentity::new(t, n))
            .and_then(|f| f.get(key))
            .map(String::as_str)
    }

    #[test]
    fn test_parses_single_block() {
        let table = parse_resources(
            r#"resource "aws_instance" "web" {
  ami           = "ami-123"
  instance_type = "t3.micro",
}
"#,
        );

        assert_eq!(table.len(), 1);
        assert_eq!(field(&table, "aws_instance", "web", "ami"), Some("\"ami-123\""));
        assert_eq!(
            field(&table, "aws_instance", "web", "instance_type"),
            Some("\"t3.micro\"")
        );
    }

    #[test]
    fn test_value_split_on_first_equals() {
        let table = parse_resources(
            "resource \"null_resource\" \"cmp\" {\n  expr = a == b\n}\n",
        );
        assert_eq!(field(&table, "null_resource", "cmp", "expr"), Some("a == b"));
    }

    #[test]
    fn test_all_trailing_commas_stripped() {
        let table = parse_resources("resource \"t\" \"n\" {\n  k = v,,\n}\n");
        assert_eq!(field(&table, "t", "n", "k"), Some("v"));
    }

    #[test]
    fn test_lines_outside_blocks_ignored() {
        let table = parse_resources(
            "variable = \"ignored\"\nprovider \"aws\" {\n  region = \"eu-west-1\"\n}\n",
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_header_must_start_the_line() {
        let table = parse_resources("  resource \"aws_instance\" \"web\" {\n  ami = \"x\"\n}\n");
        assert!(table.is_empty());
    }

    #[test]
    fn test_non_word_names_not_recognised() {
        let table = parse_resources("resource \"aws-instance\" \"web\" {\n  ami = \"x\"\n}\n");
        assert!(table.is_empty());
    }

    #[test]
    fn test_redeclared_identity_resets_fields() {
        let table = parse_resources(
            "resource \"t\" \"n\" {\n  a = 1\n}\nresource \"t\" \"n\" {\n  b = 2\n}\n",
        );
        let fields = table.get(&ResourceIdentity::new("t", "n")).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_empty_block_has_empty_field_map() {
        let table = parse_resources("resource \"t\" \"n\" {}\n");
        assert_eq!(table.get(&ResourceIdentity::new("t", "n")), Some(&FieldMap::new()));
    }

    #[test]
    fn test_crlf_line_endings() {
        let table = parse_resources("resource \"t\" \"n\" {\r\n  a = 1\r\n}\r\nx = 2\r\n");
        assert_eq!(field(&table, "t", "n", "a"), Some("1"));
        assert_eq!(field(&table, "t", "n", "x"), None);
    }

    // Known limitation: nested blocks close the resource early.
    #[test]
    fn test_nested_block_closes_resource_early() {
        let table = parse_resources(
            r#"resource "aws_instance" "web" {
  tags = {
    Name = "web"
  }
  ami = "after-nested"
}
"#,
        );

        assert_eq!(field(&table, "aws_instance", "web", "tags"), Some("{"));
        assert_eq!(field(&table, "aws_instance", "web", "Name"), Some("\"web\""));
        assert_eq!(field(&table, "aws_instance", "web", "ami"), None);
    }

    // Known limitation: an unterminated block swallows later assignments.
    #[test]
    fn test_unterminated_block_stays_open() {
        let table = parse_resources("resource \"t\" \"n\" {\n  a = 1\n\nlocals_value = 2\n");
        assert_eq!(field(&table, "t", "n", "a"), Some("1"));
        assert_eq!(field(&table, "t", "n", "locals_value"), Some("2"));
    }
}
