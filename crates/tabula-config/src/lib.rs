//! Build configuration for the TabulaRasa web client bundle.
//!
//! [`ConfigBuilder`] turns one bundler invocation into one
//! [`BuildConfiguration`]: entry and output paths, module resolution
//! directories, loader rules, dev-server proxy rules, and a plugin list that
//! depends on the resolved [`BuildMode`]. Fixed project facts come from
//! [`ProjectSettings`], which [`SettingsDiscovery`] layers from defaults, a
//! `tabula.toml` descriptor, and the environment.

pub mod builder;
pub mod bundle;
pub mod discovery;
pub mod error;
pub mod mode;
pub mod settings;
pub mod validation;

// Re-export main types
pub use builder::{ConfigBuilder, MODE_LOG_TARGET};
pub use bundle::*;
pub use error::*;
pub use mode::*;
pub use settings::*;

// Re-export discovery and validation
pub use discovery::{discover, SettingsDiscovery};
pub use validation::{validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator};
