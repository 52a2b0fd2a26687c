use serde::{Deserialize, Serialize, Serializer};
use serde_json::json;

use crate::settings::{TranspilerSettings, DEFAULT_TRANSPILER_PRESET};

/// When compatibility polyfills are injected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolyfillStrategy {
    /// Inject every polyfill once at the bundle entry
    #[default]
    Entry,
    /// Inject only the polyfills detected as used
    Usage,
}

/// Syntax-lowering options shared by the script loaders.
///
/// Serializes in the preset form the loaders expect:
/// `{"presets": [[preset, {"modules": false, "useBuiltIns": "entry"}]]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspilerOptions {
    pub preset: String,

    /// Leave ES module syntax for the bundler
    pub keep_es_modules: bool,

    pub polyfills: PolyfillStrategy,
}

impl Default for TranspilerOptions {
    fn default() -> Self {
        Self {
            preset: DEFAULT_TRANSPILER_PRESET.to_string(),
            keep_es_modules: true,
            polyfills: PolyfillStrategy::Entry,
        }
    }
}

impl From<&TranspilerSettings> for TranspilerOptions {
    fn from(settings: &TranspilerSettings) -> Self {
        Self {
            preset: settings.preset.clone(),
            keep_es_modules: settings.keep_es_modules,
            polyfills: settings.polyfills,
        }
    }
}

impl Serialize for TranspilerOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let modules = if self.keep_es_modules {
            json!(false)
        } else {
            json!("auto")
        };
        json!({
            "presets": [[
                self.preset,
                { "modules": modules, "useBuiltIns": self.polyfills }
            ]]
        })
        .serialize(serializer)
    }
}
