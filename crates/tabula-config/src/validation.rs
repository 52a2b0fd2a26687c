//! Pluggable config validation strategies
//!
//! Separates structural checks from filesystem checks. The builder runs the
//! structural checks on every configuration; the filesystem checks only run
//! on request, so building never depends on the project tree existing.

use std::path::{Path, PathBuf};

use crate::bundle::BuildConfiguration;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &BuildConfiguration) -> Result<()>;
}

/// Structural validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use tabula_config::{BuildMode, ConfigBuilder, ConfigValidator, SchemaValidator};
///
/// let config = ConfigBuilder::new("/srv/client")
///     .build_for_mode(BuildMode::Development)
///     .unwrap();
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildConfiguration) -> Result<()> {
        // Plugin set must match the mode, and only that mode
        let analyzer = config.has_bundle_analyzer();
        let hot = config.has_hot_reload();
        if config.mode().is_production() && (!analyzer || hot) {
            return Err(schema_error(
                "production builds must carry the bundle analyzer and no hot reloading plugins",
                None,
            ));
        }
        if !config.mode().is_production() && (!hot || analyzer) {
            return Err(schema_error(
                "development builds must carry hot reloading plugins and no bundle analyzer",
                None,
            ));
        }

        if !config.entry().is_absolute() {
            return Err(schema_error(
                format!("entry path must be absolute: {}", config.entry().display()),
                Some("Build from an absolute project root"),
            ));
        }
        if !config.output().path.is_absolute() {
            return Err(schema_error(
                format!(
                    "output path must be absolute: {}",
                    config.output().path.display()
                ),
                Some("Build from an absolute project root"),
            ));
        }
        if config.output().filename.trim().is_empty() {
            return Err(schema_error(
                "output filename cannot be empty",
                Some("Set layout.output_filename in tabula.toml"),
            ));
        }

        if config.resolve().modules.is_empty() {
            return Err(schema_error("no module resolution directories", None));
        }

        for rule in config.rules() {
            if rule.loaders.is_empty() {
                return Err(schema_error(
                    format!("rule {} has an empty loader chain", rule.test),
                    None,
                ));
            }
        }

        if let Some(dev) = config.dev_server() {
            if dev.port == 0 {
                return Err(schema_error(
                    "dev server port cannot be 0",
                    Some("Set dev_server.port to a free local port"),
                ));
            }
            for rule in &dev.proxy {
                if !(rule.target.starts_with("http://") || rule.target.starts_with("https://")) {
                    return Err(schema_error(
                        format!(
                            "proxy target '{}' for '{}' is not an http(s) origin",
                            rule.target, rule.path_pattern
                        ),
                        Some("Use an origin such as http://localhost:8080"),
                    ));
                }
            }
        }

        Ok(())
    }
}

fn schema_error(message: impl Into<String>, hint: Option<&str>) -> ConfigError {
    ConfigError::SchemaValidation {
        message: message.into(),
        hint: hint.map(str::to_string),
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs the structural checks, then requires the entry module to exist.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BuildConfiguration) -> Result<()> {
        SchemaValidator.validate(config)?;

        // Absolute entries ignore the root
        let path = self.root.join(config.entry());
        if !path.exists() {
            return Err(ConfigError::EntryNotFound { path });
        }

        Ok(())
    }
}

/// Convenience function for structural validation
pub fn validate_schema(config: &BuildConfiguration) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &BuildConfiguration, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
