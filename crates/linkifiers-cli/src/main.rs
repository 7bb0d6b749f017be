// Rust guideline compliant 2026-02-06

//! edit-linkifiers
//!
//! Administrative command for a realm's linkifiers.

use clap::{CommandFactory, Parser};
use linkifiers_cli::{commands, create_formatter, logger, should_use_color, terminal, AdminContext};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "edit-linkifiers",
    version,
    about = "Create, show, or remove linkifiers for a realm",
    long_about = "Create, show, or remove linkifiers for a realm.\n\nPatterns must be simple enough to translate to JavaScript RegExp syntax. Named groups are converted to numbered groups automatically, and inline flags are lifted to pattern-wide flags where possible.",
    after_help = "Examples:\n  edit-linkifiers --realm zulip --op add '#(?P<id>[0-9]{2,8})' 'https://support.example.com/ticket/%(id)s'\n  edit-linkifiers --realm zulip --op remove '#(?P<id>[0-9]{2,8})'\n  edit-linkifiers --realm zulip --op show\n"
)]
struct Cli {
    /// Realm id or string_id
    #[arg(long, short = 'r')]
    realm: String,

    /// What operation to do
    #[arg(long, value_enum, default_value_t = Op::Show)]
    op: Op,

    /// Regular expression to match
    #[arg(value_name = "PATTERN")]
    pattern: Option<String>,

    /// URL format string to substitute
    #[arg(value_name = "URL_FORMAT_STRING")]
    url_format_string: Option<String>,

    /// Enable JSON output
    #[arg(long)]
    json: bool,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Directory holding linkifiers.toml and the realm files
    #[arg(long, env = "LINKIFIERS_DATA_DIR", default_value = linkifiers_cli::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Custom config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output
    #[arg(long, short = 'q')]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Op {
    Add,
    Show,
    Remove,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Json,
    Table,
    Plain,
}

impl From<FormatArg> for linkifiers_core::OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => Self::Json,
            FormatArg::Table => Self::Table,
            FormatArg::Plain => Self::Plain,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_for(cli.verbose, cli.quiet));

    // Usage errors exit with clap's status (2) before touching any state.
    let (pattern, url_format_string) = match check_positionals(&cli) {
        Ok(args) => args,
        Err(message) => Cli::command()
            .error(clap::error::ErrorKind::MissingRequiredArgument, message)
            .exit(),
    };

    let use_color = !cli.no_color && should_use_color();

    let context = match AdminContext::open(&cli.data_dir, cli.config.as_deref(), &cli.realm) {
        Ok(context) => context,
        Err(e) => {
            let format = resolve_format(&cli, linkifiers_core::OutputFormat::default());
            let formatter = create_formatter(format, use_color);
            terminal::print_error(&formatter.format_error(&format!("{:#}", e)));
            return ExitCode::FAILURE;
        }
    };

    let format = resolve_format(&cli, context.config.output_format);
    let formatter = create_formatter(format, use_color);

    let result = match cli.op {
        Op::Show => commands::show::execute(&context, formatter.as_ref()),
        Op::Add => {
            commands::add::execute(&context, &pattern, &url_format_string, formatter.as_ref())
                .map(|_| ())
        }
        Op::Remove => commands::remove::execute(&context, &pattern, formatter.as_ref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{:?}", e);
            terminal::print_error(&formatter.format_error(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}

/// Returns the positionals the operation needs, or a usage message.
fn check_positionals(cli: &Cli) -> Result<(String, String), String> {
    let pattern = cli.pattern.clone().unwrap_or_default();
    let url_format_string = cli.url_format_string.clone().unwrap_or_default();
    match cli.op {
        Op::Show => Ok((pattern, url_format_string)),
        Op::Add | Op::Remove if pattern.is_empty() => {
            Err("a <PATTERN> is required for this operation".to_string())
        }
        Op::Add if url_format_string.is_empty() => {
            Err("--op add requires a <URL_FORMAT_STRING>".to_string())
        }
        _ => Ok((pattern, url_format_string)),
    }
}

/// `--format` wins over `--json`, which wins over the configured default.
fn resolve_format(cli: &Cli, configured: linkifiers_core::OutputFormat) -> linkifiers_core::OutputFormat {
    match cli.format {
        Some(format) => format.into(),
        None if cli.json => linkifiers_core::OutputFormat::Json,
        None => configured,
    }
}
