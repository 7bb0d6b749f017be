// Rust guideline compliant 2026-02-06

//! Unit tests for error types and messages.
//!
//! These tests validate error formatting and context preservation.

use linkifiers_core::Error;

#[test]
fn test_io_error_formatting() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = Error::Io(io_err);
    let msg = error.to_string();
    assert!(
        msg.contains("IO error"),
        "IO error should contain 'IO error' prefix"
    );
}

#[test]
fn test_json_error_formatting() {
    let json_err = serde_json::from_str::<serde_json::Value>("invalid json")
        .expect_err("Should fail to parse invalid JSON");
    let error = Error::Json(json_err);
    assert!(error.to_string().starts_with("JSON error: "));
}

#[test]
fn test_validation_error_messages() {
    let cases = [
        (
            Error::InvalidSyntax("missing ) at position 4".to_string()),
            "Invalid pattern syntax: missing ) at position 4",
        ),
        (
            Error::UnsupportedConstruct("lookbehind assertion".to_string()),
            "Unsupported regex construct: lookbehind assertion",
        ),
        (
            Error::ConflictingFlags("'i'".to_string()),
            "Conflicting inline flags: 'i'",
        ),
        (
            Error::PlaceholderOutOfRange("%(3)s".to_string()),
            "Placeholder out of range: %(3)s",
        ),
        (
            Error::InvalidUrlFormat("stray '%'".to_string()),
            "Invalid URL format string: stray '%'",
        ),
    ];
    for (error, expected) in cases {
        assert_eq!(error.to_string(), expected);
    }
}

#[test]
fn test_registry_error_messages() {
    assert_eq!(
        Error::DuplicatePattern("#(\\d+)".to_string()).to_string(),
        "Linkifier already exists for pattern: #(\\d+)"
    );
    assert_eq!(
        Error::NotFound("#(\\d+)".to_string()).to_string(),
        "Linkifier not found: #(\\d+)"
    );
    assert_eq!(
        Error::IncompleteSet("missing patterns: a".to_string()).to_string(),
        "Incomplete linkifier set: missing patterns: a"
    );
    assert_eq!(
        Error::RealmNotFound("zulip".to_string()).to_string(),
        "Realm not found: zulip"
    );
}

#[test]
fn test_io_error_conversion() {
    fn read_missing() -> linkifiers_core::Result<String> {
        Ok(std::fs::read_to_string("/nonexistent/linkifiers/realm-1.jsonl")?)
    }
    assert!(matches!(read_missing(), Err(Error::Io(_))));
}

#[test]
fn test_validation_errors_carry_position() {
    match linkifiers_core::validate("ab(cd") {
        Err(Error::InvalidSyntax(msg)) => assert!(msg.contains("position"), "got {}", msg),
        other => panic!("expected InvalidSyntax, got {:?}", other),
    }
}
