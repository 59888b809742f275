//! Property tests for the resource parser

use infraver_core::{parse_resources, ResourceIdentity};
use proptest::prelude::*;

fn render_block(resource_type: &str, name: &str, fields: &[(String, String)]) -> String {
    let mut out = format!("resource \"{}\" \"{}\" {{\n", resource_type, name);
    for (k, v) in fields {
        out.push_str(&format!("  {} = {}\n", k, v));
    }
    out.push_str("}\n");
    out
}

fn block_strategy() -> impl Strategy<Value = (String, String, Vec<(String, String)>)> {
    (
        "[a-z][a-z0-9_]{0,12}",
        "[a-z][a-z0-9_]{0,12}",
        prop::collection::vec(("[a-z][a-z_]{0,8}", "\"[a-z0-9-]{0,10}\""), 0..6),
    )
}

proptest! {
    #[test]
    fn parsing_is_idempotent(blocks in prop::collection::vec(block_strategy(), 0..6)) {
        let text: String = blocks
            .iter()
            .map(|(t, n, f)| render_block(t, n, f))
            .collect();

        prop_assert_eq!(parse_resources(&text), parse_resources(&text));
    }

    #[test]
    fn every_well_formed_block_is_found(blocks in prop::collection::vec(block_strategy(), 1..6)) {
        let text: String = blocks
            .iter()
            .map(|(t, n, f)| render_block(t, n, f))
            .collect();
        let table = parse_resources(&text);

        for (t, n, _) in &blocks {
            prop_assert!(table.contains(&ResourceIdentity::new(t.as_str(), n.as_str())));
        }
    }

    #[test]
    fn last_declaration_wins(
        (t, n, fields) in block_strategy(),
        (_, _, later) in block_strategy(),
    ) {
        let text = format!("{}{}", render_block(&t, &n, &fields), render_block(&t, &n, &later));
        let table = parse_resources(&text);
        let parsed = table.get(&ResourceIdentity::new(t.as_str(), n.as_str())).unwrap();

        for (k, _) in &later {
            let last = later.iter().rev().find(|(lk, _)| lk == k).map(|(_, lv)| lv);
            prop_assert_eq!(parsed.get(k), last);
        }
        prop_assert!(parsed.keys().all(|k| later.iter().any(|(lk, _)| lk == k)));
    }
}
