//! Error types for configuration building, loading, and validation.
//!
//! Every variant is a startup error: nothing here is recovered locally, the
//! caller propagates it and the build process stops.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Invocation errors
    #[error("unknown build mode '{0}' (expected 'production' or 'development')")]
    InvalidMode(String),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    // Settings parsing/loading errors
    #[error("settings file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid value for '{field}'{}", .hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("invalid profile override: {message}")]
    InvalidProfileOverride { message: String },

    #[error("failed to load settings: {0}")]
    Settings(#[from] Box<figment::Error>),

    // Validation errors
    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    #[error("entry path not found: {}", .path.display())]
    EntryNotFound { path: PathBuf },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Settings(Box::new(err))
    }
}
