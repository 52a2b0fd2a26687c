//! Miette diagnostic conversion for CLI errors.

use miette::Report;
use tabula_config::ConfigError;

use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::SchemaValidation {
            message,
            hint: Some(hint),
        } => miette::miette!(help = hint, "Invalid configuration: {}", message),
        ConfigError::InvalidValue {
            field,
            hint: Some(hint),
        } => miette::miette!(help = hint, "Invalid value for '{}'", field),
        ConfigError::InvalidMode(mode) => miette::miette!(
            help = "Pass --mode production or --mode development",
            "Unknown build mode '{}'",
            mode
        ),
        ConfigError::EntryNotFound { path } => miette::miette!(
            help = "Check layout.entry in tabula.toml",
            "Entry module not found: {}",
            path.display()
        ),
        other => miette::miette!("Configuration error: {}", other),
    }
}
