//! Command-line interface definition for Tabula.
//!
//! # Command Structure
//!
//! - `tabula config` - Resolve the bundle configuration and emit it as JSON
//! - `tabula check` - Build both modes and validate them against the project

mod commands;
mod validation;

use clap::Parser;

pub use commands::{CheckArgs, Command, ConfigArgs, DEFAULT_DOCUMENT_FILE};
pub use validation::parse_env_pair;

/// Tabula - build configuration for the TabulaRasa client bundle
#[derive(Parser, Debug)]
#[command(
    name = "tabula",
    version,
    about = "Resolve the client bundle configuration",
    long_about = "Tabula derives the bundler configuration for the TabulaRasa web client.\n\
                  It decides production or development mode from the invocation, applies\n\
                  project settings from tabula.toml, and emits the resolved configuration."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors and the mode line
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
