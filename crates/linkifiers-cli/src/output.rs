// Rust guideline compliant 2026-02-06

//! Output formatting module for `edit-linkifiers`.
//!
//! This module provides functionality for formatting linkifier data
//! in various output formats (JSON, table, plain text).

use linkifiers_core::{Linkifier, OutputFormat, Realm};
use serde_json::json;
use std::io::Write;
use tabled::{builder::Builder, settings::Style};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Output formatter trait.
///
/// Defines the interface for formatting linkifier data in different output formats.
pub trait OutputFormatter {
    /// Formats a single linkifier, typically one that was just added.
    ///
    /// # Arguments
    /// * `realm` - The owning realm
    /// * `linkifier` - The linkifier to format
    fn format_linkifier(&self, realm: &Realm, linkifier: &Linkifier) -> String;

    /// Formats a realm's linkifiers in order.
    ///
    /// # Arguments
    /// * `realm` - The owning realm
    /// * `linkifiers` - The linkifiers to format, sorted by order
    fn format_list(&self, realm: &Realm, linkifiers: &[Linkifier]) -> String;

    /// Formats the confirmation for a removed linkifier.
    ///
    /// # Arguments
    /// * `realm` - The owning realm
    /// * `pattern` - The pattern as given on the command line
    fn format_removed(&self, realm: &Realm, pattern: &str) -> String;

    /// Formats an error message for display.
    ///
    /// # Arguments
    /// * `error` - The error message to format
    fn format_error(&self, error: &str) -> String;
}

/// JSON output formatter.
///
/// Formats linkifiers as valid JSON for machine consumption.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_linkifier(&self, realm: &Realm, linkifier: &Linkifier) -> String {
        let output = json!({
            "realm": realm.string_id,
            "linkifier": linkifier,
        });
        serde_json::to_string_pretty(&output)
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize linkifier" }).to_string())
    }

    fn format_list(&self, realm: &Realm, linkifiers: &[Linkifier]) -> String {
        let output = json!({
            "realm": realm.string_id,
            "linkifiers": linkifiers,
            "total": linkifiers.len(),
        });
        serde_json::to_string_pretty(&output)
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize linkifier list" }).to_string())
    }

    fn format_removed(&self, realm: &Realm, pattern: &str) -> String {
        json!({ "realm": realm.string_id, "removed": pattern }).to_string()
    }

    fn format_error(&self, error: &str) -> String {
        json!({ "error": error }).to_string()
    }
}

/// Table output formatter.
///
/// Formats linkifiers as human-readable tables.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl OutputFormatter for TableFormatter {
    fn format_linkifier(&self, realm: &Realm, linkifier: &Linkifier) -> String {
        let mut output = String::new();
        output.push_str(&format!("Realm:       {}\n", realm.string_id));
        output.push_str(&format!("Pattern:     {}\n", linkifier.pattern));
        output.push_str(&format!("URL format:  {}\n", linkifier.url_format_string));
        output.push_str(&format!("Order:       {}\n", linkifier.order));
        output
    }

    fn format_list(&self, realm: &Realm, linkifiers: &[Linkifier]) -> String {
        if linkifiers.is_empty() {
            return format!("No linkifiers found for realm {}.", realm.string_id);
        }

        let mut builder = Builder::default();
        builder.push_record(vec!["Order", "Pattern", "URL format"]);

        for linkifier in linkifiers {
            builder.push_record(vec![
                linkifier.order.to_string(),
                linkifier.pattern.clone(),
                linkifier.url_format_string.clone(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());

        format!("{}\n{}", realm.string_id, table)
    }

    fn format_removed(&self, realm: &Realm, pattern: &str) -> String {
        format!("Removed linkifier {} from realm {}", pattern, realm.string_id)
    }

    fn format_error(&self, error: &str) -> String {
        if !self.use_color {
            return format!("Error: {}", error);
        }

        let mut buffer = Buffer::ansi();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
        let _ = write!(buffer, "Error: ");
        let _ = buffer.reset();
        let _ = write!(buffer, "{}", error);
        String::from_utf8_lossy(buffer.as_slice()).to_string()
    }
}

/// Plain text output formatter.
///
/// Formats linkifiers as a single line per command, suitable for scripts.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_linkifier(&self, _realm: &Realm, linkifier: &Linkifier) -> String {
        format!(
            "{} {} {}",
            linkifier.order, linkifier.pattern, linkifier.url_format_string
        )
    }

    fn format_list(&self, realm: &Realm, linkifiers: &[Linkifier]) -> String {
        let entries: Vec<String> = linkifiers
            .iter()
            .map(|l| format!("('{}', '{}', {})", l.pattern, l.url_format_string, l.order))
            .collect();
        format!("{}: [{}]", realm.string_id, entries.join(", "))
    }

    fn format_removed(&self, _realm: &Realm, pattern: &str) -> String {
        pattern.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }
}

/// Factory function to create an appropriate formatter.
///
/// # Arguments
/// * `format` - The desired output format
/// * `use_color` - Whether to use colored output (ignored for JSON and plain)
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter::new(use_color)),
        OutputFormat::Plain => Box::new(PlainFormatter),
    }
}
