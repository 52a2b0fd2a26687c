//! The resolved build configuration handed to the external bundler.

mod dev;
mod plugin;
mod rules;
mod transform;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::mode::BuildMode;

pub use dev::{DevServerOptions, ProxyOptions, ProxyRule};
pub use plugin::{plugins_for, AnalyzerMode, BundleAnalyzerOptions, PluginDescriptor};
pub use rules::{LoaderEntry, ModuleOptions, ModuleRule, Pattern};
pub use transform::{PolyfillStrategy, TranspilerOptions};

/// Where the bundle is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputOptions {
    pub filename: String,
    pub path: PathBuf,
}

/// Module resolution directories, searched in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveOptions {
    pub modules: Vec<PathBuf>,
}

/// One fully resolved configuration for a single bundler invocation.
///
/// Values are produced by [`crate::ConfigBuilder`] and exposed read-only, so
/// the mode and everything derived from it stay fixed once built.
/// Serializes to the camelCase document the bundler reads; regular
/// expressions are written as `{"regexp": "<source>"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfiguration {
    mode: BuildMode,

    entry: PathBuf,

    output: OutputOptions,

    resolve: ResolveOptions,

    #[serde(skip_serializing_if = "Option::is_none")]
    dev_server: Option<DevServerOptions>,

    module: ModuleOptions,

    plugins: Vec<PluginDescriptor>,

    /// Already embedded in the loader options that need it
    #[serde(skip)]
    transpiler: TranspilerOptions,
}

impl BuildConfiguration {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        mode: BuildMode,
        entry: PathBuf,
        output: OutputOptions,
        resolve: ResolveOptions,
        dev_server: Option<DevServerOptions>,
        module: ModuleOptions,
        plugins: Vec<PluginDescriptor>,
        transpiler: TranspilerOptions,
    ) -> Self {
        Self {
            mode,
            entry,
            output,
            resolve,
            dev_server,
            module,
            plugins,
            transpiler,
        }
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn entry(&self) -> &Path {
        &self.entry
    }

    pub fn output(&self) -> &OutputOptions {
        &self.output
    }

    pub fn resolve(&self) -> &ResolveOptions {
        &self.resolve
    }

    pub fn dev_server(&self) -> Option<&DevServerOptions> {
        self.dev_server.as_ref()
    }

    pub fn module(&self) -> &ModuleOptions {
        &self.module
    }

    pub fn rules(&self) -> &[ModuleRule] {
        &self.module.rules
    }

    pub fn plugins(&self) -> &[PluginDescriptor] {
        &self.plugins
    }

    pub fn transpiler(&self) -> &TranspilerOptions {
        &self.transpiler
    }

    /// Full path of the emitted bundle
    pub fn bundle_path(&self) -> PathBuf {
        self.output.path.join(&self.output.filename)
    }

    pub fn has_bundle_analyzer(&self) -> bool {
        self.plugins.iter().any(PluginDescriptor::is_bundle_analyzer)
    }

    pub fn has_hot_reload(&self) -> bool {
        self.plugins.iter().any(PluginDescriptor::is_hot_reload)
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Render the bundler document as single-line JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Render the bundler document as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            hint: Some(e.to_string()),
        })
    }
}
