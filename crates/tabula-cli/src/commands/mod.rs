//! Command implementations for the Tabula CLI.
//!
//! - [`config`] - Resolve and emit the bundle configuration
//! - [`check`] - Validate both modes against the project

pub mod check;
pub mod config;
pub(crate) mod utils;

// Re-export execute functions for convenience
pub use check::execute as check_execute;
pub use config::execute as config_execute;
