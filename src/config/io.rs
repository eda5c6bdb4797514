//! Handles all file input/output operations for the configuration.

use super::path::get_config_file_path;
use super::structure::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Loads configuration from the configuration file
///
/// # Errors
///
/// Returns an error if:
/// - The configuration path cannot be determined
/// - File reading fails
/// - JSON parsing fails
pub fn load_config() -> Result<Config> {
    load_config_from_file(get_config_file_path()?)
}

/// Saves configuration to the configuration file
///
/// # Errors
///
/// Returns an error if the path cannot be determined or writing fails
pub fn save_config(config: &Config) -> Result<()> {
    save_config_to_file(config, get_config_file_path()?)
}

/// Loads configuration from a specific file path
///
/// A missing or empty file yields the default configuration.
///
/// # Errors
///
/// Returns an error if file reading or JSON parsing fails
pub fn load_config_from_file<P: AsRef<Path>>(config_path: P) -> Result<Config> {
    let config_path = config_path.as_ref();

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(config_path)?;
    let trimmed_content = config_content.trim();

    if trimmed_content.is_empty() {
        return Ok(Config::default());
    }

    serde_json::from_str(trimmed_content).map_err(|e| Error::Config {
        path: config_path.to_path_buf(),
        message: format!("failed to parse configuration: {}", e),
    })
}

/// Saves configuration to a specific file path
///
/// The parent directory is created if needed. The file is written to a
/// sibling temporary file and renamed into place.
///
/// # Errors
///
/// Returns an error if:
/// - Directory creation fails
/// - JSON serialization fails
/// - File writing fails
pub fn save_config_to_file<P: AsRef<Path>>(config: &Config, config_path: P) -> Result<()> {
    let config_path = config_path.as_ref();

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut config_content = serde_json::to_string_pretty(config).map_err(|e| Error::Config {
        path: config_path.to_path_buf(),
        message: format!("failed to serialize configuration: {}", e),
    })?;

    if !config_content.ends_with('\n') {
        config_content.push('\n');
    }

    let temp_path = config_path.with_extension("json.tmp");
    fs::write(&temp_path, config_content)?;
    fs::rename(&temp_path, config_path)?;

    tracing::debug!(path = %config_path.display(), "saved configuration");
    Ok(())
}
