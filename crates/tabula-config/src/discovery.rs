//! File-based settings discovery
//!
//! Layers, lowest priority first: built-in defaults, the deployment
//! descriptor (`tabula.toml`, or the `tabula` field of `package.json`), then
//! `TABULA_*` environment variables (`__` separates nested keys, e.g.
//! `TABULA_DEV_SERVER__PORT=9000`).

use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format as _, Serialized, Toml};
use figment::Figment;
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::settings::ProjectSettings;

pub const SETTINGS_FILE: &str = "tabula.toml";
pub const PACKAGE_JSON_FIELD: &str = "tabula";
pub const ENV_PREFIX: &str = "TABULA_";

/// Settings discovery rooted at a project directory
///
/// # Example
///
/// ```no_run
/// use tabula_config::SettingsDiscovery;
///
/// let settings = SettingsDiscovery::new(".").load().unwrap();
/// ```
pub struct SettingsDiscovery {
    root: PathBuf,
    env_prefix: String,
}

impl SettingsDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Read environment overrides from a different prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a settings file in the root directory
    ///
    /// Searches in this order:
    /// 1. tabula.toml
    /// 2. package.json (tabula field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(SETTINGS_FILE);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.is_file() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get(PACKAGE_JSON_FIELD).is_some_and(|v| !v.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load settings, falling back to defaults when no descriptor exists
    pub fn load(&self) -> Result<ProjectSettings> {
        let path = self.find();
        match &path {
            Some(path) => tracing::debug!("Loading settings from {}", path.display()),
            None => tracing::debug!("No settings file in {}, using defaults", self.root.display()),
        }
        self.extract(path.as_deref())
    }

    /// Load settings from a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist.
    pub fn load_from(&self, path: impl AsRef<Path>) -> Result<ProjectSettings> {
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        if !path.is_file() {
            return Err(ConfigError::NotFound(path));
        }
        self.extract(Some(&path))
    }

    fn extract(&self, path: Option<&Path>) -> Result<ProjectSettings> {
        let mut figment = Figment::new().merge(Serialized::defaults(ProjectSettings::default()));

        if let Some(path) = path {
            figment = if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
                figment.merge(Serialized::defaults(package_json_field(path)?))
            } else {
                figment.merge(Toml::file(path))
            };
        }

        figment = figment.merge(Env::prefixed(&self.env_prefix).split("__"));

        Ok(figment.extract()?)
    }
}

fn package_json_field(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;

    let parsed: Value = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: "package.json".to_string(),
        hint: Some(format!("Invalid JSON: {e}")),
    })?;

    match parsed.get(PACKAGE_JSON_FIELD) {
        Some(value) if value.is_object() => Ok(value.clone()),
        Some(_) => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: Some("The 'tabula' field must be an object".to_string()),
        }),
        None => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: Some("Add a 'tabula' field to your package.json".to_string()),
        }),
    }
}

/// Discover and load settings for a project root (convenience function)
pub fn discover(root: impl AsRef<Path>) -> Result<ProjectSettings> {
    SettingsDiscovery::new(root).load()
}
