// Rust guideline compliant 2026-02-06

//! Command implementations for `edit-linkifiers`.

pub mod add;
pub mod remove;
pub mod show;
