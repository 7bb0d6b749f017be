// Rust guideline compliant 2026-02-06

//! Unit tests for the linkifier registry.
//!
//! These tests validate add/remove/list/reorder semantics, dense ordering,
//! duplicate detection on canonical patterns, and applying rules to text.

use linkifiers_core::models::is_dense;
use linkifiers_core::{Error, JsonlStore, MemoryStore, Registry};
use std::sync::Arc;
use tempfile::TempDir;
use test_log::test;

const REALM: u64 = 2;
const TICKET_PATTERN: &str = "#(?P<id>[0-9]{2,8})";
const TICKET_URL: &str = "https://support.example.com/ticket/%(id)s";

fn registry() -> Registry<MemoryStore> {
    Registry::new(MemoryStore::new())
}

fn patterns(registry: &Registry<MemoryStore>, realm: u64) -> Vec<String> {
    registry
        .list(realm)
        .into_iter()
        .map(|l| l.pattern)
        .collect()
}

#[test]
fn test_add_stores_canonical_forms() {
    let registry = registry();
    let created = registry
        .add(REALM, TICKET_PATTERN, TICKET_URL)
        .expect("Failed to add linkifier");

    assert_eq!(created.realm_id, REALM);
    assert_eq!(created.pattern, "#([0-9]{2,8})");
    assert_eq!(
        created.url_format_string,
        "https://support.example.com/ticket/%(1)s"
    );
    assert_eq!(created.order, 0);
    assert_eq!(registry.list(REALM), vec![created]);
}

#[test]
fn test_add_appends_in_order() {
    let registry = registry();
    for (i, pattern) in ["A-(\\d+)", "B-(\\d+)", "C-(\\d+)"].iter().enumerate() {
        let created = registry
            .add(REALM, pattern, "https://example.com/%(1)s")
            .expect("Failed to add linkifier");
        assert_eq!(created.order as usize, i);
    }
    assert_eq!(patterns(&registry, REALM), vec!["A-(\\d+)", "B-(\\d+)", "C-(\\d+)"]);
}

#[test]
fn test_duplicate_detected_on_canonical_form() {
    let registry = registry();
    registry
        .add(REALM, TICKET_PATTERN, TICKET_URL)
        .expect("Failed to add linkifier");

    let result = registry.add(
        REALM,
        "#(?P<num>[0-9]{2,8})",
        "https://other.example.com/%(num)s",
    );
    match result {
        Err(Error::DuplicatePattern(pattern)) => assert_eq!(pattern, "#([0-9]{2,8})"),
        other => panic!("expected DuplicatePattern, got {:?}", other),
    }
    assert_eq!(registry.list(REALM).len(), 1);
}

#[test]
fn test_same_pattern_in_different_realms() {
    let registry = registry();
    registry.add(1, TICKET_PATTERN, TICKET_URL).expect("realm 1");
    registry.add(2, TICKET_PATTERN, TICKET_URL).expect("realm 2");
    assert_eq!(registry.list(1).len(), 1);
    assert_eq!(registry.list(2).len(), 1);
}

#[test]
fn test_add_rejects_bad_url_without_storing() {
    let registry = registry();

    let result = registry.add(REALM, TICKET_PATTERN, "https://example.com/%(missing)s");
    assert!(matches!(result, Err(Error::PlaceholderOutOfRange(_))));

    let result = registry.add(REALM, TICKET_PATTERN, "https://example.com/%(2)s");
    assert!(matches!(result, Err(Error::PlaceholderOutOfRange(_))));

    let result = registry.add(REALM, TICKET_PATTERN, "javascript:alert(1)");
    assert!(matches!(result, Err(Error::InvalidUrlFormat(_))));

    assert!(registry.list(REALM).is_empty());
}

#[test]
fn test_add_rejects_bad_pattern_without_storing() {
    let registry = registry();
    assert!(matches!(
        registry.add(REALM, "(?<=#)\\d+", "https://example.com/"),
        Err(Error::UnsupportedConstruct(_))
    ));
    assert!(matches!(
        registry.add(REALM, "(\\d+", "https://example.com/%(1)s"),
        Err(Error::InvalidSyntax(_))
    ));
    assert!(matches!(
        registry.add(REALM, "(?i)a(?-i:b)", "https://example.com/"),
        Err(Error::ConflictingFlags(_))
    ));
    assert!(registry.list(REALM).is_empty());
}

#[test]
fn test_pattern_length_limit() {
    let registry = Registry::new(MemoryStore::new()).with_max_pattern_length(8);
    assert!(registry.add(REALM, "abc(\\d)", "https://example.com/").is_ok());
    assert!(matches!(
        registry.add(REALM, "abcdef(\\d+)", "https://example.com/"),
        Err(Error::InvalidSyntax(_))
    ));
}

#[test]
fn test_lowered_length_limit_keeps_stored_rules_manageable() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let long_pattern = format!("{}-(\\d+)", "x".repeat(60));
    let short_pattern = "RT-(\\d+)";

    let open = |limit: usize| {
        let store = JsonlStore::new(temp_dir.path().to_path_buf()).expect("Failed to create store");
        Registry::new(store).with_max_pattern_length(limit)
    };

    let registry = open(500);
    registry
        .add(REALM, &long_pattern, "https://example.com/%(1)s")
        .expect("Failed to add long linkifier");
    registry
        .add(REALM, short_pattern, "https://rt.example.com/%(1)s")
        .expect("Failed to add short linkifier");

    let registry = open(50);
    assert!(matches!(
        registry.add(REALM, &format!("y{}", long_pattern), "https://example.com/"),
        Err(Error::InvalidSyntax(_))
    ));

    registry
        .reorder(REALM, &[short_pattern.to_string(), long_pattern.clone()])
        .expect("Reorder of stored rules failed under the lowered limit");
    assert_eq!(registry.list(REALM)[1].pattern, long_pattern);

    registry
        .remove(REALM, &long_pattern)
        .expect("Remove of stored rule failed under the lowered limit");
    let remaining = registry.list(REALM);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].pattern, short_pattern);
    assert_eq!(remaining[0].order, 0);
}

#[test]
fn test_list_is_empty_when_store_cannot_be_read() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = JsonlStore::new(temp_dir.path().to_path_buf()).expect("Failed to create store");
    std::fs::create_dir(store.realm_path(REALM)).expect("Failed to create blocking directory");

    let registry = Registry::new(store);
    assert!(registry.list(REALM).is_empty());
    assert!(registry.matcher(REALM).is_empty());
    assert_eq!(registry.apply(REALM, "#42"), "#42");
}

#[test]
fn test_remove_by_any_spelling() {
    let registry = registry();
    registry
        .add(REALM, TICKET_PATTERN, TICKET_URL)
        .expect("Failed to add linkifier");

    registry
        .remove(REALM, "#([0-9]{2,8})")
        .expect("Failed to remove linkifier");
    assert!(registry.list(REALM).is_empty());

    registry
        .add(REALM, "#([0-9]{2,8})", TICKET_URL.replace("id", "1").as_str())
        .expect("Failed to re-add linkifier");
    registry
        .remove(REALM, "#(?P<other>[0-9]{2,8})")
        .expect("Failed to remove linkifier by named spelling");
    assert!(registry.list(REALM).is_empty());
}

#[test]
fn test_remove_missing_is_not_found() {
    let registry = registry();
    assert!(matches!(
        registry.remove(REALM, "nothing(\\d+)"),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_remove_keeps_orders_dense() {
    let registry = registry();
    for pattern in ["A-(\\d+)", "B-(\\d+)", "C-(\\d+)", "D-(\\d+)"] {
        registry
            .add(REALM, pattern, "https://example.com/%(1)s")
            .expect("Failed to add linkifier");
    }

    registry.remove(REALM, "B-(\\d+)").expect("Failed to remove");
    let listed = registry.list(REALM);
    assert!(is_dense(&listed));
    assert_eq!(patterns(&registry, REALM), vec!["A-(\\d+)", "C-(\\d+)", "D-(\\d+)"]);

    let created = registry
        .add(REALM, "E-(\\d+)", "https://example.com/%(1)s")
        .expect("Failed to add linkifier");
    assert_eq!(created.order, 3);
}

#[test]
fn test_list_unknown_realm_is_empty() {
    assert!(registry().list(999).is_empty());
}

#[test]
fn test_apply_wraps_matches() {
    let registry = registry();
    registry
        .add(REALM, TICKET_PATTERN, TICKET_URL)
        .expect("Failed to add linkifier");

    assert_eq!(
        registry.apply(REALM, "ticket #42"),
        "ticket <a href=\"https://support.example.com/ticket/42\">#42</a>"
    );
    assert_eq!(registry.apply(REALM, "ticket #4"), "ticket #4");
    assert_eq!(registry.apply(99, "ticket #42"), "ticket #42");
}

#[test]
fn test_overlapping_rules_first_in_order_wins() {
    let registry = registry();
    registry
        .add(REALM, "#([0-9]+)", "https://a.example.com/%(1)s")
        .expect("Failed to add linkifier");
    registry
        .add(REALM, "([0-9]+)", "https://b.example.com/%(1)s")
        .expect("Failed to add linkifier");

    assert_eq!(
        registry.apply(REALM, "#12 and 34"),
        "<a href=\"https://a.example.com/12\">#12</a> and \
         <a href=\"https://b.example.com/34\">34</a>"
    );

    registry
        .reorder(REALM, &["([0-9]+)".to_string(), "#([0-9]+)".to_string()])
        .expect("Failed to reorder");

    assert_eq!(
        registry.apply(REALM, "#12 and 34"),
        "#<a href=\"https://b.example.com/12\">12</a> and \
         <a href=\"https://b.example.com/34\">34</a>"
    );
}

#[test]
fn test_find_links_reports_spans() {
    let registry = registry();
    registry
        .add(
            REALM,
            "(?P<org>[a-z]+)/(?P<repo>[a-z]+)#(?P<id>[0-9]+)",
            "https://github.com/%(org)s/%(repo)s/pull/%(id)s",
        )
        .expect("Failed to add linkifier");

    let links = registry.find_links(REALM, "see zulip/zulip#123.");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].start, 4);
    assert_eq!(links[0].end, 19);
    assert_eq!(links[0].text, "zulip/zulip#123");
    assert_eq!(links[0].url, "https://github.com/zulip/zulip/pull/123");
    assert_eq!(links[0].order, 0);
}

#[test]
fn test_reorder() {
    let registry = registry();
    for pattern in ["A-(\\d+)", "B-(\\d+)", "C-(\\d+)"] {
        registry
            .add(REALM, pattern, "https://example.com/%(1)s")
            .expect("Failed to add linkifier");
    }

    let reordered = registry
        .reorder(
            REALM,
            &[
                "C-(\\d+)".to_string(),
                "A-(?P<n>\\d+)".to_string(),
                "B-(\\d+)".to_string(),
            ],
        )
        .expect("Failed to reorder");

    let listed: Vec<(String, u32)> = reordered.into_iter().map(|l| (l.pattern, l.order)).collect();
    assert_eq!(
        listed,
        vec![
            ("C-(\\d+)".to_string(), 0),
            ("A-(\\d+)".to_string(), 1),
            ("B-(\\d+)".to_string(), 2),
        ]
    );
    assert_eq!(patterns(&registry, REALM), vec!["C-(\\d+)", "A-(\\d+)", "B-(\\d+)"]);
}

#[test]
fn test_reorder_errors_leave_state_unchanged() {
    let registry = registry();
    for pattern in ["A-(\\d+)", "B-(\\d+)"] {
        registry
            .add(REALM, pattern, "https://example.com/%(1)s")
            .expect("Failed to add linkifier");
    }

    assert!(matches!(
        registry.reorder(REALM, &["B-(\\d+)".to_string()]),
        Err(Error::IncompleteSet(_))
    ));
    assert!(matches!(
        registry.reorder(
            REALM,
            &[
                "B-(\\d+)".to_string(),
                "B-(?P<x>\\d+)".to_string(),
                "A-(\\d+)".to_string(),
            ]
        ),
        Err(Error::IncompleteSet(_))
    ));
    assert!(matches!(
        registry.reorder(
            REALM,
            &["B-(\\d+)".to_string(), "Z-(\\d+)".to_string()]
        ),
        Err(Error::NotFound(_))
    ));

    assert_eq!(patterns(&registry, REALM), vec!["A-(\\d+)", "B-(\\d+)"]);
}

#[test]
fn test_purge_realm() {
    let registry = registry();
    registry.add(1, "A-(\\d+)", "https://example.com/%(1)s").expect("add");
    registry.add(1, "B-(\\d+)", "https://example.com/%(1)s").expect("add");
    registry.add(2, "A-(\\d+)", "https://example.com/%(1)s").expect("add");

    assert_eq!(registry.apply(1, "A-1"), "<a href=\"https://example.com/1\">A-1</a>");
    assert_eq!(registry.purge_realm(1).expect("purge"), 2);
    assert!(registry.list(1).is_empty());
    assert_eq!(registry.apply(1, "A-1"), "A-1");
    assert_eq!(registry.list(2).len(), 1);
}

#[test]
fn test_matcher_cache_tracks_changes() {
    let registry = registry();
    registry.add(REALM, "A-(\\d+)", "https://example.com/%(1)s").expect("add");

    let first = registry.matcher(REALM);
    let second = registry.matcher(REALM);
    assert!(Arc::ptr_eq(&first, &second));

    registry.add(REALM, "B-(\\d+)", "https://example.com/%(1)s").expect("add");
    let third = registry.matcher(REALM);
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(third.len(), 2);
}

#[test]
fn test_stored_records_validate() {
    let registry = registry();
    registry
        .add(REALM, "(?i)(?P<org>\\w+)#(?P<id>\\d+)", "https://x.org/%(org)s/%(id)s?a=1%%")
        .expect("add");
    for linkifier in registry.list(REALM) {
        linkifier.validate().expect("stored record is canonical");
    }
}
