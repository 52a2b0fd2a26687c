use serde::Serialize;

use crate::mode::BuildMode;

/// A plugin the bundler instantiates, serialized as `{name, options}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "name", content = "options")]
pub enum PluginDescriptor {
    /// Bundle size report, production only
    #[serde(rename = "BundleAnalyzerPlugin")]
    BundleAnalyzer(BundleAnalyzerOptions),

    #[serde(rename = "HotModuleReplacementPlugin")]
    HotModuleReplacement,

    /// Readable module ids in hot-update output
    #[serde(rename = "NamedModulesPlugin")]
    NamedModules,
}

impl PluginDescriptor {
    pub fn name(&self) -> &'static str {
        match self {
            PluginDescriptor::BundleAnalyzer(_) => "BundleAnalyzerPlugin",
            PluginDescriptor::HotModuleReplacement => "HotModuleReplacementPlugin",
            PluginDescriptor::NamedModules => "NamedModulesPlugin",
        }
    }

    pub fn is_bundle_analyzer(&self) -> bool {
        matches!(self, PluginDescriptor::BundleAnalyzer(_))
    }

    pub fn is_hot_reload(&self) -> bool {
        matches!(
            self,
            PluginDescriptor::HotModuleReplacement | PluginDescriptor::NamedModules
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleAnalyzerOptions {
    pub generate_stats_file: bool,
    pub analyzer_mode: AnalyzerMode,
}

impl Default for BundleAnalyzerOptions {
    fn default() -> Self {
        Self {
            generate_stats_file: true,
            analyzer_mode: AnalyzerMode::Static,
        }
    }
}

/// How the analyzer publishes its report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerMode {
    Server,
    #[default]
    Static,
    Disabled,
}

/// Plugin list for a mode: the analyzer in production, hot reloading otherwise.
pub fn plugins_for(mode: BuildMode) -> Vec<PluginDescriptor> {
    match mode {
        BuildMode::Production => vec![PluginDescriptor::BundleAnalyzer(
            BundleAnalyzerOptions::default(),
        )],
        BuildMode::Development => vec![
            PluginDescriptor::HotModuleReplacement,
            PluginDescriptor::NamedModules,
        ],
    }
}
