//! Project settings: the fixed layout and server facts a build is derived from.
//!
//! Every default is a named constant so a deployment descriptor
//! (`tabula.toml`, see [`crate::discovery`]) can override it without code
//! changes. Per-mode overrides live under `profiles.<mode>`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bundle::PolyfillStrategy;
use crate::error::{ConfigError, Result};
use crate::mode::BuildMode;

pub const DEFAULT_PRODUCTION_FLAG: &str = "-p";

pub const DEFAULT_ENTRY: &str = "./src/TabulaRasa.Client.fsproj";
pub const DEFAULT_OUTPUT_DIR: &str = "./public";
pub const DEFAULT_OUTPUT_FILENAME: &str = "bundle.js";
pub const DEFAULT_DEPENDENCY_ROOT: &str = "node_modules";
pub const DEFAULT_LOCAL_DEPENDENCY_DIR: &str = "./node_modules/";

pub const DEFAULT_DEV_SERVER_PORT: u16 = 8090;
pub const DEFAULT_BACKEND_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_API_PROXY_PATH: &str = "/api/*";
pub const DEFAULT_SOCKET_PROXY_PATH: &str = "/socket";

pub const DEFAULT_TRANSPILER_PRESET: &str = "@babel/preset-env";
pub const DEBUG_DEFINE: &str = "DEBUG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    pub layout: LayoutSettings,

    pub dev_server: DevServerSettings,

    pub transpiler: TranspilerSettings,

    pub build: BuildSettings,

    /// Per-mode overrides, keyed by mode name (`production`, `development`)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, Value>,
}

/// Project-relative paths, joined onto the project root at build time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Application entry module
    pub entry: PathBuf,

    /// Directory the bundle is emitted into (also served by the dev server)
    pub output_dir: PathBuf,

    pub output_filename: String,

    /// Dependency root searched by name (not joined onto the project root)
    pub dependency_root: PathBuf,

    /// Project-local dependency directory
    pub local_dependency_dir: PathBuf,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            entry: PathBuf::from(DEFAULT_ENTRY),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            dependency_root: PathBuf::from(DEFAULT_DEPENDENCY_ROOT),
            local_dependency_dir: PathBuf::from(DEFAULT_LOCAL_DEPENDENCY_DIR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevServerSettings {
    pub port: u16,

    /// Origin both proxy rules forward to
    pub backend_origin: String,

    pub api_path: String,

    pub socket_path: String,

    pub hot: bool,

    pub inline: bool,
}

impl Default for DevServerSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_DEV_SERVER_PORT,
            backend_origin: DEFAULT_BACKEND_ORIGIN.to_string(),
            api_path: DEFAULT_API_PROXY_PATH.to_string(),
            socket_path: DEFAULT_SOCKET_PROXY_PATH.to_string(),
            hot: true,
            inline: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranspilerSettings {
    pub preset: String,

    pub polyfills: PolyfillStrategy,

    /// Leave ES module syntax for the bundler instead of lowering it
    pub keep_es_modules: bool,
}

impl Default for TranspilerSettings {
    fn default() -> Self {
        Self {
            preset: DEFAULT_TRANSPILER_PRESET.to_string(),
            polyfills: PolyfillStrategy::Entry,
            keep_es_modules: true,
        }
    }
}

/// Whether the source-module loader receives a compile-time define list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinePolicy {
    /// Pass `{babel, define}`; `define` holds the debug symbols outside production
    #[default]
    Conditional,
    /// Pass no options to the source-module loader
    Omit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Argument token that selects production when scanning raw arguments
    pub production_flag: String,

    pub define_policy: DefinePolicy,

    /// Symbols defined for non-production builds
    pub debug_defines: Vec<String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            production_flag: DEFAULT_PRODUCTION_FLAG.to_string(),
            define_policy: DefinePolicy::default(),
            debug_defines: vec![DEBUG_DEFINE.to_string()],
        }
    }
}

impl ProjectSettings {
    /// Create from serde_json::Value (settings held in memory or fetched elsewhere)
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "settings".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Apply the `profiles.<mode>` override, if any.
    ///
    /// Objects merge key by key; arrays and scalars replace the base value.
    pub fn materialize_profile(mut self, mode: BuildMode) -> Result<Self> {
        let Some(overrides) = self.profiles.get(mode.as_str()).cloned() else {
            return Ok(self);
        };
        if overrides.is_null() {
            return Ok(self);
        }

        let profiles = std::mem::take(&mut self.profiles);
        let mut base = serde_json::to_value(&self).map_err(|err| {
            ConfigError::InvalidProfileOverride {
                message: err.to_string(),
            }
        })?;
        merge_values(&mut base, &overrides);

        let mut merged: ProjectSettings =
            serde_json::from_value(base).map_err(|err| ConfigError::InvalidProfileOverride {
                message: format!("profile '{mode}': {err}"),
            })?;
        merged.profiles = profiles;

        tracing::debug!(profile = %mode, "applied settings profile");
        Ok(merged)
    }
}

fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                // A nested `profiles` table inside a profile is ignored
                if key == "profiles" {
                    continue;
                }
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_use_named_constants() {
        let settings = ProjectSettings::default();
        assert_eq!(settings.dev_server.port, DEFAULT_DEV_SERVER_PORT);
        assert_eq!(settings.dev_server.backend_origin, DEFAULT_BACKEND_ORIGIN);
        assert_eq!(settings.layout.output_filename, "bundle.js");
        assert_eq!(settings.build.production_flag, "-p");
        assert_eq!(settings.build.debug_defines, vec!["DEBUG"]);
        assert_eq!(settings.transpiler.polyfills, PolyfillStrategy::Entry);
    }

    #[test]
    fn from_value_fills_missing_sections() {
        let settings = ProjectSettings::from_value(json!({
            "dev_server": { "port": 9000 }
        }))
        .unwrap();
        assert_eq!(settings.dev_server.port, 9000);
        assert_eq!(settings.dev_server.api_path, DEFAULT_API_PROXY_PATH);
        assert_eq!(settings.layout, LayoutSettings::default());
    }

    #[test]
    fn from_value_rejects_wrong_types() {
        let err = ProjectSettings::from_value(json!({
            "dev_server": { "port": "not-a-port" }
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn profile_merging_works() {
        let settings = ProjectSettings::from_value(json!({
            "transpiler": { "polyfills": "entry" },
            "profiles": {
                "production": {
                    "transpiler": { "polyfills": "usage" },
                    "layout": { "output_filename": "bundle.min.js" }
                }
            }
        }))
        .unwrap();

        let prod = settings.clone().materialize_profile(BuildMode::Production).unwrap();
        assert_eq!(prod.transpiler.polyfills, PolyfillStrategy::Usage);
        assert_eq!(prod.layout.output_filename, "bundle.min.js");
        assert_eq!(prod.transpiler.preset, DEFAULT_TRANSPILER_PRESET);
        assert!(prod.profiles.contains_key("production"));

        let dev = settings.materialize_profile(BuildMode::Development).unwrap();
        assert_eq!(dev.transpiler.polyfills, PolyfillStrategy::Entry);
    }

    #[test]
    fn profile_replaces_arrays() {
        let settings = ProjectSettings::from_value(json!({
            "profiles": {
                "development": { "build": { "debug_defines": ["DEBUG", "TRACE"] } }
            }
        }))
        .unwrap();

        let dev = settings.materialize_profile(BuildMode::Development).unwrap();
        assert_eq!(dev.build.debug_defines, vec!["DEBUG", "TRACE"]);
    }

    #[test]
    fn invalid_profile_is_reported() {
        let settings = ProjectSettings::from_value(json!({
            "profiles": { "production": { "dev_server": { "port": -1 } } }
        }))
        .unwrap();

        let err = settings
            .materialize_profile(BuildMode::Production)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProfileOverride { .. }));
    }
}
