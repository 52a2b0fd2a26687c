use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::parse_env_pair;

/// Document written by `tabula config` when `--out` is not given
pub const DEFAULT_DOCUMENT_FILE: &str = "tabula.config.json";

/// Available Tabula subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the build configuration and write it as JSON
    ///
    /// The mode comes from `--mode` when given. Otherwise the raw arguments
    /// after `--` are scanned for the production flag (`-p` by default).
    /// Standard output carries only the mode line; the document goes to
    /// `--out` (tabula.config.json in the project root by default).
    Config(ConfigArgs),

    /// Validate the configuration of both modes against the project
    ///
    /// Builds production and development configurations and checks their
    /// structure and that the entry module exists.
    Check(CheckArgs),
}

/// Arguments for the config command
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Settings file to load instead of discovering tabula.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Build mode (production or development)
    ///
    /// Selects the explicit-mode invocation style; an empty value means
    /// development.
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Environment entries for the explicit invocation style
    ///
    /// Examples:
    ///   tabula config --mode production --env analyze
    ///   tabula config --env api=remote
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<String>,

    /// File to write the configuration to, relative to the project root
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_DOCUMENT_FILE)]
    pub out: PathBuf,

    /// Emit single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Raw bundler arguments, scanned for the production flag
    ///
    /// Examples:
    ///   tabula config -- -p
    ///   tabula config -- --progress --colors
    #[arg(last = true, value_name = "ARGS", conflicts_with_all = ["mode", "env"])]
    pub args: Vec<String>,
}

impl ConfigArgs {
    /// Whether the structured (explicit mode) invocation style was chosen
    pub fn is_explicit(&self) -> bool {
        self.mode.is_some() || !self.env.is_empty()
    }
}

/// Arguments for the check command
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Settings file to load instead of discovering tabula.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only check structure, not the filesystem
    #[arg(long)]
    pub schema_only: bool,
}
