// Rust guideline compliant 2026-02-06

//! Error types for the linkifiers core library.

use thiserror::Error;

/// Result type alias for linkifier operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for linkifier operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The pattern does not parse under the supported regex grammar.
    #[error("Invalid pattern syntax: {0}")]
    InvalidSyntax(String),

    /// The pattern uses a construct the client-side dialect cannot express.
    #[error("Unsupported regex construct: {0}")]
    UnsupportedConstruct(String),

    /// Two inline flags request incompatible whole-pattern settings.
    #[error("Conflicting inline flags: {0}")]
    ConflictingFlags(String),

    /// A URL placeholder does not correspond to a capture group.
    #[error("Placeholder out of range: {0}")]
    PlaceholderOutOfRange(String),

    /// The URL format string is malformed.
    #[error("Invalid URL format string: {0}")]
    InvalidUrlFormat(String),

    /// The canonical pattern is already registered for the realm.
    #[error("Linkifier already exists for pattern: {0}")]
    DuplicatePattern(String),

    /// No linkifier with the canonical pattern exists for the realm.
    #[error("Linkifier not found: {0}")]
    NotFound(String),

    /// A reorder request does not list exactly the existing patterns.
    #[error("Incomplete linkifier set: {0}")]
    IncompleteSet(String),

    /// No realm matches the selector.
    #[error("Realm not found: {0}")]
    RealmNotFound(String),

    /// Invalid configuration value or file.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
