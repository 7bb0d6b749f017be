// Rust guideline compliant 2026-02-06

//! Implementation of `edit-linkifiers --op show`.

use crate::{AdminContext, OutputFormatter};
use anyhow::Result;

/// Prints every linkifier of the context's realm, in order.
///
/// An unreadable store is logged by the registry and shows as empty.
pub fn execute(context: &AdminContext, formatter: &dyn OutputFormatter) -> Result<()> {
    let linkifiers = context.registry.list(context.realm.id);
    println!("{}", formatter.format_list(&context.realm, &linkifiers));
    Ok(())
}
