//! Configuration file management.
//!
//! The configuration file remembers a default source document so repeated
//! installs do not need `--source` every time.

pub mod io;
pub mod path;
pub mod structure;

use std::path::PathBuf;

use crate::constants::DEFAULT_SOURCE;

pub use io::{load_config, load_config_from_file, save_config, save_config_to_file};
pub use path::get_config_file_path;
pub use structure::Config;

/// Picks the source document: an explicit path wins, then the configured one,
/// then [`DEFAULT_SOURCE`] in the working directory.
pub fn source_or_default(explicit: Option<PathBuf>, config: &Config) -> PathBuf {
    explicit
        .or_else(|| config.source().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE))
}
