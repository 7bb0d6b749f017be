// Rust guideline compliant 2026-02-06

//! Linkifiers CLI library.
//!
//! This library exposes the CLI modules for use in tests and external code.

pub mod commands;
pub mod context;
pub mod logger;
pub mod output;
pub mod terminal;

pub use context::{AdminContext, DEFAULT_DATA_DIR};
pub use output::{create_formatter, OutputFormatter};
pub use terminal::should_use_color;
