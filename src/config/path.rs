//! Handles the logic for determining the configuration file path.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

use crate::constants::{APP_NAME, CONFIG_ENV};
use crate::error::{Error, Result};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Returns the path to the configuration file
///
/// Resolution order:
/// - `$AGENTLINK_CONFIG` if set and non-empty
/// - the platform configuration directory:
///   - Linux: `$XDG_CONFIG_HOME/agentlink/config.json` or `$HOME/.config/agentlink/config.json`
///   - macOS: `$HOME/Library/Application Support/agentlink/config.json`
///   - Windows: `%APPDATA%/agentlink/config/config.json`
/// - `$HOME/.config/agentlink/config.json` if platform directories cannot be determined
///
/// # Errors
///
/// Returns [`Error::HomeDirNotFound`] if no location can be determined
pub fn get_config_file_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        tracing::debug!(path = ?path, "using config path from environment");
        return Ok(PathBuf::from(path));
    }

    if let Some(project_dirs) = ProjectDirs::from("", "", APP_NAME) {
        return Ok(project_dirs.config_dir().join(CONFIG_FILE_NAME));
    }

    let base = BaseDirs::new().ok_or(Error::HomeDirNotFound)?;
    Ok(base
        .home_dir()
        .join(".config")
        .join(APP_NAME)
        .join(CONFIG_FILE_NAME))
}
