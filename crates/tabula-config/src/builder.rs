//! The configuration builder: invocation in, one [`BuildConfiguration`] out.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde_json::{json, Value};

use crate::bundle::{
    plugins_for, BuildConfiguration, DevServerOptions, LoaderEntry, ModuleOptions, ModuleRule,
    OutputOptions, Pattern, ProxyRule, ResolveOptions, TranspilerOptions,
};
use crate::error::{ConfigError, Result};
use crate::mode::{BuildMode, Invocation, ModeDetector};
use crate::settings::{DefinePolicy, ProjectSettings};
use crate::validation::{ConfigValidator, SchemaValidator};

/// Source modules: plain, signature and project files
pub const SOURCE_MODULE_PATTERN: &str = r"\.fs(x|proj)?$";
pub const SCRIPT_PATTERN: &str = r"\.js$";
/// Both stylesheet dialects
pub const STYLESHEET_PATTERN: &str = r"\.(sa|c)ss$";

pub const SOURCE_MODULE_LOADER: &str = "fable-loader";
pub const SCRIPT_LOADER: &str = "babel-loader";
pub const STYLE_LOADERS: [&str; 3] = ["style-loader", "css-loader", "sass-loader"];

/// Target of the one-line mode report emitted for every build
pub const MODE_LOG_TARGET: &str = "tabula::mode";

/// Derives build configurations for one project root.
///
/// # Example
///
/// ```
/// use tabula_config::{BuildMode, ConfigBuilder, Invocation};
///
/// let builder = ConfigBuilder::new("/srv/client");
/// let config = builder.build(&Invocation::raw(["-p"])).unwrap();
///
/// assert_eq!(config.mode(), BuildMode::Production);
/// assert!(config.has_bundle_analyzer());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    root: PathBuf,
    settings: ProjectSettings,
}

impl ConfigBuilder {
    /// Create a builder with default settings.
    ///
    /// A relative root is resolved against the working directory at build time.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            settings: ProjectSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ProjectSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    /// Detect the mode from `invocation` and build.
    pub fn build(&self, invocation: &Invocation) -> Result<BuildConfiguration> {
        let mode = invocation.detect(&self.settings.build.production_flag)?;
        self.build_for_mode(mode)
    }

    /// Build with a caller-supplied mode detection strategy.
    pub fn build_with(&self, detector: &dyn ModeDetector) -> Result<BuildConfiguration> {
        let mode = detector.detect()?;
        self.build_for_mode(mode)
    }

    /// Build for a known mode.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SchemaValidation` when the settings produce a
    /// structurally invalid configuration (port 0, a non-http proxy target,
    /// an empty output filename).
    pub fn build_for_mode(&self, mode: BuildMode) -> Result<BuildConfiguration> {
        tracing::info!(target: MODE_LOG_TARGET, "Bundling for {mode}...");

        let config = self.assemble(mode)?;
        SchemaValidator.validate(&config)?;

        tracing::debug!(
            entry = %config.entry().display(),
            bundle = %config.bundle_path().display(),
            plugins = config.plugins().len(),
            "resolved build configuration"
        );
        Ok(config)
    }

    /// Assemble without structural validation.
    pub(crate) fn assemble(&self, mode: BuildMode) -> Result<BuildConfiguration> {

        let settings = self.settings.clone().materialize_profile(mode)?;
        let root = self.project_root()?;
        let layout = &settings.layout;
        let transpiler = TranspilerOptions::from(&settings.transpiler);

        let entry = resolve(&root, &layout.entry);
        let output = OutputOptions {
            filename: layout.output_filename.clone(),
            path: resolve(&root, &layout.output_dir),
        };
        let resolve_options = ResolveOptions {
            modules: vec![
                layout.dependency_root.clone(),
                resolve(&root, &layout.local_dependency_dir),
            ],
        };

        let dev = &settings.dev_server;
        let dev_server = DevServerOptions {
            proxy: vec![
                ProxyRule::new(&dev.api_path, &dev.backend_origin).change_origin(),
                ProxyRule::new(&dev.socket_path, &dev.backend_origin).websocket(),
            ],
            content_base: output.path.clone(),
            port: dev.port,
            hot: dev.hot,
            inline: dev.inline,
        };

        let module = ModuleOptions {
            rules: module_rules(mode, &settings, &transpiler)?,
        };

        Ok(BuildConfiguration::new(
            mode,
            entry,
            output,
            resolve_options,
            Some(dev_server),
            module,
            plugins_for(mode),
            transpiler,
        ))
    }

    fn project_root(&self) -> Result<PathBuf> {
        if self.root.is_absolute() {
            Ok(self.root.clean())
        } else {
            Ok(std::env::current_dir()?.join(&self.root).clean())
        }
    }
}

/// Join lexically; the target does not have to exist.
fn resolve(root: &Path, relative: &Path) -> PathBuf {
    root.join(relative).clean()
}

fn module_rules(
    mode: BuildMode,
    settings: &ProjectSettings,
    transpiler: &TranspilerOptions,
) -> Result<Vec<ModuleRule>> {
    let babel = serde_json::to_value(transpiler).map_err(|e| ConfigError::InvalidValue {
        field: "transpiler".to_string(),
        hint: Some(e.to_string()),
    })?;

    let mut source_loader = LoaderEntry::new(SOURCE_MODULE_LOADER);
    if let Some(options) = source_loader_options(mode, settings, &babel) {
        source_loader = source_loader.with_options(options);
    }

    let dependency_dir = settings.layout.dependency_root.to_string_lossy();
    let script_rule = ModuleRule::new(
        Pattern::new(SCRIPT_PATTERN)?,
        vec![LoaderEntry::new(SCRIPT_LOADER).with_options(babel.clone())],
    )
    .excluding(Pattern::new(&regex::escape(&dependency_dir))?);

    let style_rule = ModuleRule::new(
        Pattern::new(STYLESHEET_PATTERN)?,
        STYLE_LOADERS.iter().map(|l| LoaderEntry::new(*l)).collect(),
    );

    Ok(vec![
        ModuleRule::new(Pattern::new(SOURCE_MODULE_PATTERN)?, vec![source_loader]),
        script_rule,
        style_rule,
    ])
}

fn source_loader_options(mode: BuildMode, settings: &ProjectSettings, babel: &Value) -> Option<Value> {
    match settings.build.define_policy {
        DefinePolicy::Omit => None,
        DefinePolicy::Conditional => {
            let define: &[String] = if mode.is_production() {
                &[]
            } else {
                &settings.build.debug_defines
            };
            Some(json!({ "babel": babel, "define": define }))
        }
    }
}
