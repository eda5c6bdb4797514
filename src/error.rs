//! Error types for the link installer.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Source file not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Source is not a regular file: {}", .path.display())]
    SourceNotAFile { path: PathBuf },

    #[error("Failed to link {target} at {}: {reason}", .path.display())]
    LinkCreationFailed {
        target: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Failed to remove {target} at {}: {reason}", .path.display())]
    LinkRemovalFailed {
        target: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unable to determine home directory")]
    HomeDirNotFound,

    #[error("Config Error ({}): {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("IO Error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Builds a `LinkCreationFailed` for the named target from any displayable cause.
    pub fn link_failed(target: &str, path: &Path, reason: impl ToString) -> Self {
        Error::LinkCreationFailed {
            target: target.to_string(),
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Builds a `LinkRemovalFailed` for the named target from any displayable cause.
    pub fn removal_failed(target: &str, path: &Path, reason: impl ToString) -> Self {
        Error::LinkRemovalFailed {
            target: target.to_string(),
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
