// Rust guideline compliant 2026-02-06

//! Core data models for realm linkifiers.

use serde::{Deserialize, Serialize};

/// Identifier of the realm (organization) that owns a set of linkifiers.
pub type RealmId = u64;

/// A realm record as produced by a realm resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Realm {
    /// Numeric realm identifier.
    pub id: RealmId,
    /// Short string identifier (subdomain-style slug).
    pub string_id: String,
    /// Optional human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A Linkifier turns regex matches in message text into links.
///
/// Records are never mutated in place; changing a rule is remove + add.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Linkifier {
    /// Owning realm.
    pub realm_id: RealmId,
    /// Canonical regex with positional capture groups.
    pub pattern: String,
    /// URL template with `%(N)s` positional placeholders.
    pub url_format_string: String,
    /// Match precedence, dense `0..N-1` within the realm.
    pub order: u32,
}

impl Linkifier {
    /// Validates the stored record.
    ///
    /// Re-runs canonicalization on the pattern and URL template and checks
    /// that both are already in canonical form.
    ///
    /// # Errors
    ///
    /// Returns the underlying validation error, or `InvalidSyntax` if the
    /// stored pattern is not canonical.
    pub fn validate(&self) -> crate::Result<()> {
        let translation = crate::translate::canonicalize(&self.pattern)?;
        if translation.canonical != self.pattern {
            return Err(crate::Error::InvalidSyntax(format!(
                "stored pattern '{}' is not canonical (expected '{}')",
                self.pattern, translation.canonical
            )));
        }

        let parsed = crate::pattern::validate(&self.pattern)?;
        let url = crate::url_format::canonicalize(&self.url_format_string, &parsed.groups)?;
        if url != self.url_format_string {
            return Err(crate::Error::InvalidUrlFormat(format!(
                "stored URL '{}' is not canonical (expected '{}')",
                self.url_format_string, url
            )));
        }

        Ok(())
    }
}

/// Returns true when `orders` is exactly `{0, ..., len-1}` in ascending order.
pub fn is_dense(linkifiers: &[Linkifier]) -> bool {
    linkifiers
        .iter()
        .enumerate()
        .all(|(i, linkifier)| linkifier.order as usize == i)
}

/// Sorts by `order` and rewrites orders to `0..N-1`, preserving relative order.
pub fn compact_orders(linkifiers: &mut [Linkifier]) {
    linkifiers.sort_by_key(|l| l.order);
    for (i, linkifier) in linkifiers.iter_mut().enumerate() {
        linkifier.order = i as u32;
    }
}
