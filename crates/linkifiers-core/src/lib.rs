// Rust guideline compliant 2026-02-06

//! Linkifiers Core Library
//!
//! This crate provides the foundational components for realm linkifier administration:
//! - Pattern validation (parsing into a syntax tree, rejecting non-portable constructs)
//! - Pattern translation (named → positional groups, inline → whole-pattern flags)
//! - URL format string canonicalization and expansion
//! - Storage engine (per-realm JSONL files with locking, in-memory store)
//! - Registry (add, remove, list, reorder with dense ordering)
//! - Matcher (applying a realm's rules to message text)
//! - Realm resolution, configuration, and error types

pub mod config;
pub mod error;
pub mod matcher;
pub mod models;
pub mod pattern;
pub mod realm;
pub mod registry;
pub mod storage;
pub mod translate;
pub mod url_format;

pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use matcher::{LinkMatch, Matcher};
pub use models::{Linkifier, Realm, RealmId};
pub use pattern::{validate, GroupInfo, GroupKind, ParsedPattern};
pub use realm::{ConfigRealms, RealmResolver};
pub use registry::Registry;
pub use storage::{JsonlStore, LinkifierStore, MemoryStore};
pub use translate::{canonicalize, translate, Translation};
