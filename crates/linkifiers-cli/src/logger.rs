// Rust guideline compliant 2026-02-06

//! Logger setup for `edit-linkifiers`.

use log::LevelFilter;

/// Initializes `env_logger` on stderr.
///
/// With `level` set, it overrides `RUST_LOG`; otherwise `RUST_LOG` is
/// honored and defaults to `warn`. Calling this twice is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).try_init().ok();
}

/// Maps the `-v`/`-q` flags to a level override.
pub fn level_for(verbose: bool, quiet: bool) -> Option<LevelFilter> {
    match (verbose, quiet) {
        (_, true) => Some(LevelFilter::Off),
        (true, false) => Some(LevelFilter::Debug),
        (false, false) => None,
    }
}
