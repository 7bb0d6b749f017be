// Rust guideline compliant 2026-02-06

//! Terminal utilities for `edit-linkifiers`.

use std::env;
use std::io::Write;

/// Determines if colored output should be used.
///
/// Respects the NO_COLOR environment variable and terminal capabilities.
pub fn should_use_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    atty::is(atty::Stream::Stderr)
}

/// Prints an already formatted error message to stderr.
pub fn print_error(message: &str) {
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{}", message);
}
