// Rust guideline compliant 2026-02-06

//! The per-realm linkifier registry.
//!
//! All mutations validate and translate their input before touching the
//! store, then run their duplicate/lookup checks and the write as a single
//! store transaction, so a failed call never leaves partial state behind.

use crate::matcher::{LinkMatch, Matcher};
use crate::models::{compact_orders, Linkifier, RealmId};
use crate::pattern::{self, ParsedPattern};
use crate::storage::LinkifierStore;
use crate::translate::{self, Translation};
use crate::{url_format, Config, Error, Result};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

/// Default maximum pattern length in characters.
pub const DEFAULT_MAX_PATTERN_LENGTH: usize = 500;

/// Registry of linkifiers for all realms, backed by a store.
pub struct Registry<S> {
    store: S,
    max_pattern_length: usize,
    /// Compiled matchers keyed by realm, tagged with a hash of the rule list
    /// they were built from.
    matchers: RwLock<HashMap<RealmId, (u64, Arc<Matcher>)>>,
}

impl<S: LinkifierStore> Registry<S> {
    /// Creates a registry over `store` with default limits.
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_pattern_length: DEFAULT_MAX_PATTERN_LENGTH,
            matchers: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry using the limits from `config`.
    pub fn with_config(store: S, config: &Config) -> Self {
        Self::new(store).with_max_pattern_length(config.max_pattern_length)
    }

    /// Overrides the maximum accepted pattern length.
    pub fn with_max_pattern_length(mut self, max_pattern_length: usize) -> Self {
        self.max_pattern_length = max_pattern_length;
        self
    }

    /// Validates and translates a pattern.
    ///
    /// The length limit is not applied here: it only gates new rules, so
    /// stored rules stay removable after the limit is lowered.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSyntax` if the pattern does not parse,
    /// `UnsupportedConstruct`, or `ConflictingFlags`.
    pub fn canonicalize(&self, pattern: &str) -> Result<(ParsedPattern, Translation)> {
        let parsed = pattern::validate(pattern)?;
        let translation = translate::translate(&parsed)?;
        Ok((parsed, translation))
    }

    fn check_length(&self, pattern: &str) -> Result<()> {
        let length = pattern.chars().count();
        if length > self.max_pattern_length {
            return Err(Error::InvalidSyntax(format!(
                "pattern length ({}) exceeds maximum allowed ({})",
                length, self.max_pattern_length
            )));
        }
        Ok(())
    }

    /// Adds a linkifier to a realm and returns the stored record.
    ///
    /// The new rule is appended after every existing rule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSyntax` if the pattern exceeds the configured maximum
    /// length, a validation/translation error, `PlaceholderOutOfRange` or
    /// `InvalidUrlFormat` for the URL, `DuplicatePattern` if the canonical
    /// pattern already exists in the realm, or a store error.
    pub fn add(&self, realm_id: RealmId, pattern: &str, url_format_string: &str) -> Result<Linkifier> {
        self.check_length(pattern)?;
        let (parsed, translation) = self.canonicalize(pattern)?;
        let url_format_string = url_format::canonicalize(url_format_string, &parsed.groups)?;

        let created = self.store.transaction(realm_id, |linkifiers| {
            if linkifiers.iter().any(|l| l.pattern == translation.canonical) {
                return Err(Error::DuplicatePattern(translation.canonical.clone()));
            }
            compact_orders(linkifiers);
            let order = linkifiers.len() as u32;
            let linkifier = Linkifier {
                realm_id,
                pattern: translation.canonical.clone(),
                url_format_string,
                order,
            };
            linkifiers.push(linkifier.clone());
            Ok(linkifier)
        })?;

        log::info!(
            "Added linkifier '{}' -> '{}' to realm {}",
            created.pattern,
            created.url_format_string,
            realm_id
        );

        Ok(created)
    }

    /// Removes the linkifier whose canonical pattern matches `pattern`.
    ///
    /// Survivors keep their relative order and are re-compacted to `0..N-1`.
    ///
    /// # Errors
    ///
    /// Returns a validation/translation error, `NotFound` if no rule has the
    /// canonical pattern, or a store error.
    pub fn remove(&self, realm_id: RealmId, pattern: &str) -> Result<()> {
        let (_, translation) = self.canonicalize(pattern)?;

        self.store.transaction(realm_id, |linkifiers| {
            let position = linkifiers
                .iter()
                .position(|l| l.pattern == translation.canonical)
                .ok_or_else(|| Error::NotFound(translation.canonical.clone()))?;
            linkifiers.remove(position);
            Ok(())
        })?;

        log::info!(
            "Removed linkifier '{}' from realm {}",
            translation.canonical,
            realm_id
        );
        Ok(())
    }

    /// Lists a realm's linkifiers sorted by order.
    ///
    /// Never fails: a store error is logged and yields an empty list.
    pub fn list(&self, realm_id: RealmId) -> Vec<Linkifier> {
        match self.store.load(realm_id) {
            Ok(mut linkifiers) => {
                linkifiers.sort_by_key(|l| l.order);
                linkifiers
            }
            Err(e) => {
                log::warn!("Failed to load linkifiers for realm {}: {}", realm_id, e);
                Vec::new()
            }
        }
    }

    /// Rewrites the precedence of a realm's linkifiers.
    ///
    /// `new_order` lists every existing pattern (in any spelling that
    /// canonicalizes to it) exactly once, highest precedence first.
    ///
    /// # Errors
    ///
    /// Returns a validation/translation error for an entry, `NotFound` if an
    /// entry is not registered, `IncompleteSet` if entries repeat or some
    /// registered patterns are missing, or a store error.
    pub fn reorder(&self, realm_id: RealmId, new_order: &[String]) -> Result<Vec<Linkifier>> {
        let canonical: Vec<String> = new_order
            .iter()
            .map(|p| self.canonicalize(p).map(|(_, t)| t.canonical))
            .collect::<Result<_>>()?;

        let reordered = self.store.transaction(realm_id, |linkifiers| {
            let existing: HashSet<&str> = linkifiers.iter().map(|l| l.pattern.as_str()).collect();
            if let Some(missing) = canonical.iter().find(|p| !existing.contains(p.as_str())) {
                return Err(Error::NotFound(missing.clone()));
            }

            let listed: HashSet<&str> = canonical.iter().map(String::as_str).collect();
            if listed.len() != canonical.len() {
                return Err(Error::IncompleteSet(
                    "a pattern is listed more than once".to_string(),
                ));
            }
            if listed.len() != existing.len() {
                let omitted: Vec<&str> = existing.difference(&listed).copied().collect();
                return Err(Error::IncompleteSet(format!(
                    "missing patterns: {}",
                    omitted.join(", ")
                )));
            }

            for linkifier in linkifiers.iter_mut() {
                if let Some(index) = canonical.iter().position(|p| *p == linkifier.pattern) {
                    linkifier.order = index as u32;
                }
            }
            linkifiers.sort_by_key(|l| l.order);
            Ok(linkifiers.clone())
        })?;

        log::info!(
            "Reordered {} linkifier(s) in realm {}",
            reordered.len(),
            realm_id
        );
        Ok(reordered)
    }

    /// Deletes every linkifier of a realm.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    pub fn purge_realm(&self, realm_id: RealmId) -> Result<usize> {
        let removed = self.store.delete_realm(realm_id)?;
        if let Ok(mut cache) = self.matchers.write() {
            cache.remove(&realm_id);
        }
        log::info!("Purged {} linkifier(s) from realm {}", removed, realm_id);
        Ok(removed)
    }

    /// Returns a matcher for the realm's current rules.
    ///
    /// Matchers are cached and rebuilt only when the rule list changes.
    pub fn matcher(&self, realm_id: RealmId) -> Arc<Matcher> {
        let linkifiers = self.list(realm_id);
        let key = hash_linkifiers(&linkifiers);

        if let Ok(cache) = self.matchers.read() {
            if let Some((cached_key, matcher)) = cache.get(&realm_id) {
                if *cached_key == key {
                    return Arc::clone(matcher);
                }
            }
        }

        log::debug!(
            "Compiling {} linkifier(s) for realm {}",
            linkifiers.len(),
            realm_id
        );
        let matcher = Arc::new(Matcher::new(&linkifiers));
        if let Ok(mut cache) = self.matchers.write() {
            cache.insert(realm_id, (key, Arc::clone(&matcher)));
        }
        matcher
    }

    /// Finds the links the realm's rules produce in `text`.
    pub fn find_links(&self, realm_id: RealmId, text: &str) -> Vec<LinkMatch> {
        self.matcher(realm_id).find_links(text)
    }

    /// Substitutes the realm's links into `text`.
    pub fn apply(&self, realm_id: RealmId, text: &str) -> String {
        self.matcher(realm_id).apply(text)
    }
}

fn hash_linkifiers(linkifiers: &[Linkifier]) -> u64 {
    let mut hasher = DefaultHasher::new();
    linkifiers.hash(&mut hasher);
    hasher.finish()
}
