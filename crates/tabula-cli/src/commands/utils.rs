//! Shared utilities for command implementations.

use std::path::{Path, PathBuf};

use tabula_config::{ProjectSettings, SettingsDiscovery};

use crate::error::Result;

/// Resolve the project root: `--cwd` if given, else the working directory.
pub fn project_root(cwd: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    Ok(match cwd {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => current.join(path),
        None => current,
    })
}

/// Resolve a path relative to the project root.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Load project settings from an explicit file or by discovery.
pub fn load_settings(root: &Path, config: Option<&Path>) -> Result<ProjectSettings> {
    let discovery = SettingsDiscovery::new(root);
    let settings = match config {
        Some(path) => discovery.load_from(path)?,
        None => discovery.load()?,
    };
    Ok(settings)
}
