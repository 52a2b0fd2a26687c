//! Error handling for the Tabula CLI.
//!
//! `CliError` wraps the configuration errors of `tabula-config` together with
//! the failures only the command line can hit (arguments, output files).
//! `main` converts it to a miette report for display.

mod report;

use std::path::PathBuf;
use thiserror::Error;

pub use report::cli_error_to_miette;
pub use tabula_config::ConfigError;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration building, loading, or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Could not write the resolved configuration
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Attach the output path to an I/O failure.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|source| CliError::WriteFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}
