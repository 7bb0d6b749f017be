// Rust guideline compliant 2026-02-06

//! Implementation of `edit-linkifiers --op add`.
//!
//! Validates and translates the pattern, canonicalizes the URL format
//! string, and appends the rule after the realm's existing linkifiers.

use crate::{AdminContext, OutputFormatter};
use anyhow::{Context, Result};
use linkifiers_core::Linkifier;

/// Adds a linkifier to the context's realm.
///
/// # Arguments
///
/// * `context` - The resolved realm and registry
/// * `pattern` - Regex pattern, named groups allowed
/// * `url_format_string` - URL template with `%(name)s` or `%(N)s` placeholders
/// * `formatter` - The output formatter to use
///
/// # Returns
///
/// The stored linkifier.
///
/// # Errors
///
/// Returns an error if:
/// - The pattern is invalid or unsupported
/// - The URL format string is malformed or references a missing group
/// - The realm already has a linkifier with the same canonical pattern
/// - The store cannot be written
pub fn execute(
    context: &AdminContext,
    pattern: &str,
    url_format_string: &str,
    formatter: &dyn OutputFormatter,
) -> Result<Linkifier> {
    let linkifier = context
        .registry
        .add(context.realm.id, pattern, url_format_string)
        .with_context(|| {
            format!(
                "Failed to add linkifier to realm {}",
                context.realm.string_id
            )
        })?;

    println!("{}", formatter.format_linkifier(&context.realm, &linkifier));
    Ok(linkifier)
}
