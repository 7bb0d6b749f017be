// Rust guideline compliant 2026-02-06

//! Realm resolution.

use crate::models::Realm;
use crate::{Error, Result};

/// Resolves a realm selector to a realm record.
pub trait RealmResolver {
    /// Resolves a numeric id or a `string_id`.
    ///
    /// # Errors
    ///
    /// Returns `RealmNotFound` if no realm matches.
    fn resolve(&self, selector: &str) -> Result<Realm>;
}

/// Resolves realms from a fixed list, typically the `[[realms]]` tables of
/// the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigRealms {
    realms: Vec<Realm>,
}

impl ConfigRealms {
    /// Creates a resolver over `realms`.
    pub fn new(realms: Vec<Realm>) -> Self {
        Self { realms }
    }
}

impl RealmResolver for ConfigRealms {
    fn resolve(&self, selector: &str) -> Result<Realm> {
        let selector = selector.trim();
        let found = match selector.parse::<u64>() {
            Ok(id) => self.realms.iter().find(|r| r.id == id),
            Err(_) => self.realms.iter().find(|r| r.string_id == selector),
        };
        found
            .cloned()
            .ok_or_else(|| Error::RealmNotFound(selector.to_string()))
    }
}
