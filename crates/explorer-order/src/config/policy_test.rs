//! Tests for the policy model and document coercion.

use super::{ConfigDocument, OrderEntry, Policy};
use serde_json::json;

fn sample_tree() -> Policy {
    Policy::new(vec![
        OrderEntry::simple("README.md"),
        OrderEntry::nested(
            "src",
            Policy::new(vec![
                OrderEntry::simple("main.rs"),
                OrderEntry::nested("config", Policy::from_names(["mod.rs", "store.rs"])),
            ]),
        ),
        OrderEntry::simple("Cargo.toml"),
    ])
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parses_simple_and_nested_entries() {
    let policy = Policy::from_value(&json!(["README.md", { "src": ["main.rs"] }, "Cargo.toml"]));

    assert_eq!(policy.len(), 3);
    assert_eq!(policy.entries()[0], OrderEntry::simple("README.md"));
    assert_eq!(policy.entries()[1].name(), "src");
    assert_eq!(policy.child("src"), Some(&Policy::from_names(["main.rs"])));
    assert_eq!(policy.rank_of("Cargo.toml"), Some(2));
}

#[test]
fn test_simple_entry_has_no_child_policy() {
    let policy = Policy::from_names(["docs"]);
    assert_eq!(policy.rank_of("docs"), Some(0));
    assert_eq!(policy.child("docs"), None);
}

#[test]
fn test_non_list_policy_is_empty() {
    assert!(Policy::from_value(&json!({ "src": [] })).is_empty());
    assert!(Policy::from_value(&json!("src")).is_empty());
    assert!(Policy::from_value(&json!(null)).is_empty());
}

#[test]
fn test_malformed_elements_are_dropped() {
    let policy = Policy::from_value(&json!(["a", 42, null, true, ["nested"], "b"]));
    assert_eq!(policy, Policy::from_names(["a", "b"]));
}

#[test]
fn test_nested_value_that_is_not_a_list_becomes_empty_policy() {
    let policy = Policy::from_value(&json!([{ "src": "main.rs" }]));
    assert_eq!(policy.child("src"), Some(&Policy::default()));
}

#[test]
fn test_multi_key_object_expands_in_document_order() {
    let policy = Policy::from_value(&json!([{ "zeta": ["z"], "alpha": ["a"] }]));
    let names: Vec<&str> = policy.entries().iter().map(OrderEntry::name).collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
    assert_eq!(policy.child("alpha"), Some(&Policy::from_names(["a"])));
}

#[test]
fn test_duplicate_names_keep_first_occurrence() {
    let policy = Policy::from_value(&json!(["a", "b", "a", { "b": ["x"] }, { "b": ["y"] }]));
    assert_eq!(policy.len(), 2);
    assert_eq!(policy.rank_of("a"), Some(0));
    assert_eq!(policy.rank_of("b"), Some(1));
    assert_eq!(policy.child("b"), Some(&Policy::from_names(["x"])));
}

#[test]
fn test_later_nested_duplicate_keeps_its_folder_order() {
    let policy = Policy::from_value(&json!(["src", "README.md", { "src": ["b.rs", "a.rs"] }]));

    assert_eq!(
        policy,
        Policy::new(vec![
            OrderEntry::nested("src", Policy::from_names(["b.rs", "a.rs"])),
            OrderEntry::simple("README.md"),
        ])
    );
}

#[test]
fn test_nested_entry_is_not_replaced_by_later_simple_duplicate() {
    let policy = Policy::from_value(&json!([{ "src": ["main.rs"] }, "src"]));

    assert_eq!(policy.len(), 1);
    assert_eq!(policy.child("src"), Some(&Policy::from_names(["main.rs"])));
}

#[test]
fn test_document_with_simple_then_nested_duplicate_keeps_sub_policy() {
    let document = ConfigDocument::from_json(r#"{ "sortFolders": ["src", { "src": ["b.rs", "a.rs"] }] }"#).unwrap();

    let folders = document.folders().unwrap();
    assert_eq!(folders.rank_of("src"), Some(0));
    assert_eq!(folders.child("src"), Some(&Policy::from_names(["b.rs", "a.rs"])));
}

// ============================================================================
// Document
// ============================================================================

#[test]
fn test_document_reads_both_keys() {
    let document = ConfigDocument::from_json(r#"{ "sortGlobal": ["g"], "sortFolders": ["src"] }"#).unwrap();
    assert_eq!(document.global(), Some(&Policy::from_names(["g"])));
    assert_eq!(document.folders(), Some(&Policy::from_names(["src"])));
    assert!(!document.is_empty());
}

#[test]
fn test_document_missing_keys_are_none() {
    let document = ConfigDocument::from_json("{}").unwrap();
    assert_eq!(document.global(), None);
    assert_eq!(document.folders(), None);
    assert!(document.is_empty());
}

#[test]
fn test_document_legacy_sort_key() {
    let document = ConfigDocument::from_json(r#"{ "sort": ["src", "docs"] }"#).unwrap();
    assert_eq!(document.folders(), Some(&Policy::from_names(["src", "docs"])));
}

#[test]
fn test_document_sort_folders_wins_over_legacy_key() {
    let document = ConfigDocument::from_json(r#"{ "sort": ["old"], "sortFolders": ["new"] }"#).unwrap();
    assert_eq!(document.folders(), Some(&Policy::from_names(["new"])));
}

#[test]
fn test_document_with_wrong_top_level_shape_is_empty() {
    let document = ConfigDocument::from_json(r#"["src"]"#).unwrap();
    assert_eq!(document, ConfigDocument::default());
}

#[test]
fn test_document_with_wrong_section_shape_is_empty_section() {
    let document = ConfigDocument::from_json(r#"{ "sortGlobal": "README.md", "sortFolders": ["src"] }"#).unwrap();
    assert_eq!(document.global(), Some(&Policy::default()));
    assert_eq!(document.folders(), Some(&Policy::from_names(["src"])));
}

#[test]
fn test_invalid_json_is_an_error() {
    assert!(ConfigDocument::from_json(r#"{ "sortFolders": [ "#).is_err());
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_policy_tree_round_trips_through_json() {
    let document = ConfigDocument::new(Some(sample_tree()), Some(Policy::from_names(["LICENSE"])));

    let text = document.to_json_pretty().unwrap();
    let parsed = ConfigDocument::from_json(&text).unwrap();

    assert_eq!(parsed, document);
}

#[test]
fn test_policy_serializes_to_config_shape() {
    let value = serde_json::to_value(sample_tree()).unwrap();
    assert_eq!(
        value,
        json!([
            "README.md",
            { "src": ["main.rs", { "config": ["mod.rs", "store.rs"] }] },
            "Cargo.toml"
        ])
    );
}

#[test]
fn test_policy_deserializes_through_serde() {
    let policy: Policy = serde_json::from_str(r#"["a", { "b": ["c"] }]"#).unwrap();
    assert_eq!(policy.child("b"), Some(&Policy::from_names(["c"])));
}

#[test]
fn test_empty_document_serializes_without_keys() {
    let text = serde_json::to_string(&ConfigDocument::default()).unwrap();
    assert_eq!(text, "{}");
}
