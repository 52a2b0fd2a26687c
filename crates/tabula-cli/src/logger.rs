//! Logging infrastructure for the Tabula CLI.
//!
//! Two `tracing` layers share one subscriber:
//!
//! - the mode line (`Bundling for production...`), logged under
//!   [`MODE_LOG_TARGET`], goes to standard output as a bare message at
//!   every verbosity
//! - all other diagnostics go to standard error through a compact formatter,
//!   filtered by `--verbose`, `--quiet` or `RUST_LOG`
//!
//! # Example
//!
//! ```rust,no_run
//! use tabula_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("Resolving configuration");
//! ```

use tabula_config::MODE_LOG_TARGET;
use tracing::Metadata;
use tracing_subscriber::{
    EnvFilter, Layer, filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

const VERBOSE_FILTER: &str = "tabula_config=debug,tabula_cli=debug";
const QUIET_FILTER: &str = "tabula_config=error,tabula_cli=error";
const DEFAULT_FILTER: &str = "tabula_config=info,tabula_cli=info";

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at the start of the program. The diagnostics filter is chosen
/// in this order:
/// 1. `--verbose`: DEBUG for the tabula crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG` environment variable
/// 4. INFO for the tabula crates
///
/// The mode line ignores the filter.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    init_logger_with_filter(filter, no_color);
}

/// Initialize logger with custom environment filter for diagnostics.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let diagnostics = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact()
        .with_filter(filter)
        .with_filter(filter_fn(|meta| !is_mode_line(meta)));

    let mode_line = fmt::layer()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_level(false)
        .with_ansi(false)
        .with_filter(filter_fn(is_mode_line));

    tracing_subscriber::registry()
        .with(diagnostics)
        .with(mode_line)
        .init();
}

fn is_mode_line(meta: &Metadata<'_>) -> bool {
    meta.target() == MODE_LOG_TARGET
}

/// Check if colored output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}
