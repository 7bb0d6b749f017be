// Rust guideline compliant 2026-02-06

//! Integration tests for CLI commands.

use linkifiers_cli::{commands, AdminContext, OutputFormatter};
use linkifiers_core::{Config, Linkifier, Realm};
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

struct CaptureFormatter {
    captured: Mutex<Vec<Linkifier>>,
    removed: Mutex<Vec<String>>,
}

impl CaptureFormatter {
    fn new() -> Self {
        Self {
            captured: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        }
    }

    fn take(&self) -> Vec<Linkifier> {
        std::mem::take(&mut *self.captured.lock().expect("capture lock"))
    }
}

impl OutputFormatter for CaptureFormatter {
    fn format_linkifier(&self, _realm: &Realm, linkifier: &Linkifier) -> String {
        self.captured
            .lock()
            .expect("capture lock")
            .push(linkifier.clone());
        "ok".to_string()
    }

    fn format_list(&self, _realm: &Realm, linkifiers: &[Linkifier]) -> String {
        self.captured
            .lock()
            .expect("capture lock")
            .extend_from_slice(linkifiers);
        "ok".to_string()
    }

    fn format_removed(&self, _realm: &Realm, pattern: &str) -> String {
        self.removed
            .lock()
            .expect("capture lock")
            .push(pattern.to_string());
        "ok".to_string()
    }

    fn format_error(&self, error: &str) -> String {
        error.to_string()
    }
}

/// Writes a config with two realms into a fresh data directory.
fn setup_data_dir() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = Config {
        realms: vec![
            Realm {
                id: 2,
                string_id: "zulip".to_string(),
                name: Some("Zulip Dev".to_string()),
            },
            Realm {
                id: 3,
                string_id: "lear".to_string(),
                name: None,
            },
        ],
        ..Config::default()
    };
    config
        .save(temp_dir.path())
        .expect("Failed to save config");
    temp_dir
}

#[test]
fn test_open_resolves_realm_by_string_id_and_id() {
    let temp_dir = setup_data_dir();

    let context = AdminContext::open(temp_dir.path(), None, "zulip").expect("open by string_id");
    assert_eq!(context.realm.id, 2);

    let context = AdminContext::open(temp_dir.path(), None, "3").expect("open by id");
    assert_eq!(context.realm.string_id, "lear");
}

#[test]
fn test_open_unknown_realm_fails() {
    let temp_dir = setup_data_dir();
    let error = match AdminContext::open(temp_dir.path(), None, "nope") {
        Ok(_) => panic!("expected unknown realm to fail"),
        Err(e) => e,
    };
    assert!(format!("{:#}", error).contains("Realm not found: nope"));
}

#[test]
fn test_open_with_explicit_config_path() {
    let temp_dir = setup_data_dir();
    let other = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("linkifiers.toml");

    let context = AdminContext::open(other.path(), Some(&config_path), "zulip")
        .expect("open with explicit config");
    assert_eq!(context.realm.id, 2);
}

#[test]
fn test_add_show_remove_flow() {
    let temp_dir = setup_data_dir();
    let context = AdminContext::open(temp_dir.path(), None, "zulip").expect("open");
    let formatter = CaptureFormatter::new();

    let created = commands::add::execute(
        &context,
        "#(?P<id>[0-9]{2,8})",
        "https://support.example.com/ticket/%(id)s",
        &formatter,
    )
    .expect("Add failed");
    assert_eq!(created.pattern, "#([0-9]{2,8})");
    assert_eq!(
        created.url_format_string,
        "https://support.example.com/ticket/%(1)s"
    );
    assert_eq!(formatter.take(), vec![created.clone()]);

    commands::add::execute(&context, "RT-(\\d+)", "https://rt.example.com/%(1)s", &formatter)
        .expect("Add failed");
    formatter.take();

    commands::show::execute(&context, &formatter).expect("Show failed");
    let listed = formatter.take();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0], created);
    assert_eq!(listed[1].order, 1);

    commands::remove::execute(&context, "#(?P<id>[0-9]{2,8})", &formatter).expect("Remove failed");
    assert_eq!(
        formatter.removed.lock().expect("capture lock").as_slice(),
        ["#(?P<id>[0-9]{2,8})".to_string()]
    );

    commands::show::execute(&context, &formatter).expect("Show failed");
    let listed = formatter.take();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].pattern, "RT-(\\d+)");
    assert_eq!(listed[0].order, 0);
}

#[test]
fn test_add_errors_are_reported_with_context() {
    let temp_dir = setup_data_dir();
    let context = AdminContext::open(temp_dir.path(), None, "zulip").expect("open");
    let formatter = CaptureFormatter::new();

    commands::add::execute(&context, "#(\\d+)", "https://x.example.com/%(1)s", &formatter)
        .expect("Add failed");

    let error = commands::add::execute(
        &context,
        "#(?P<n>\\d+)",
        "https://x.example.com/%(n)s",
        &formatter,
    )
    .expect_err("duplicate add must fail");
    let message = format!("{:#}", error);
    assert!(message.contains("Failed to add linkifier to realm zulip"));
    assert!(message.contains("already exists"));

    let error = commands::remove::execute(&context, "missing(\\d+)", &formatter)
        .expect_err("remove of missing pattern must fail");
    assert!(format!("{:#}", error).contains("Linkifier not found"));
}

#[test]
fn test_realms_are_isolated() {
    let temp_dir = setup_data_dir();
    let zulip = AdminContext::open(temp_dir.path(), None, "zulip").expect("open");
    let lear = AdminContext::open(temp_dir.path(), None, "lear").expect("open");
    let formatter = CaptureFormatter::new();

    commands::add::execute(&zulip, "#(\\d+)", "https://x.example.com/%(1)s", &formatter)
        .expect("Add failed");
    formatter.take();

    commands::show::execute(&lear, &formatter).expect("Show failed");
    assert!(formatter.take().is_empty());

    let files: Vec<String> = fs::read_dir(temp_dir.path())
        .expect("read data dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    assert!(files.contains(&"realm-2.jsonl".to_string()));
    assert!(!files.contains(&"realm-3.jsonl".to_string()));
}
