// Rust guideline compliant 2026-02-06

//! Implementation of `edit-linkifiers --op remove`.

use crate::{AdminContext, OutputFormatter};
use anyhow::{Context, Result};

/// Removes the linkifier whose canonical pattern matches `pattern`.
///
/// Any spelling that translates to the stored pattern is accepted, so a
/// rule added with named groups can be removed with the same text.
///
/// # Errors
///
/// Returns an error if the pattern is invalid, no such linkifier exists, or
/// the store cannot be written.
pub fn execute(context: &AdminContext, pattern: &str, formatter: &dyn OutputFormatter) -> Result<()> {
    context
        .registry
        .remove(context.realm.id, pattern)
        .with_context(|| {
            format!(
                "Failed to remove linkifier from realm {}",
                context.realm.string_id
            )
        })?;

    println!("{}", formatter.format_removed(&context.realm, pattern));
    Ok(())
}
