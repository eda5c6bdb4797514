//! Defines the `Config` struct and its implementation.

use std::path::{Path, PathBuf};

/// Persisted settings
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Source document used when neither `--source` nor the environment names one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Creates a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the remembered source document, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Remembers `source` as the default source document
    ///
    /// # Returns
    ///
    /// Returns `true` if the stored value changed
    pub fn set_source<P: AsRef<Path>>(&mut self, source: P) -> bool {
        let source = source.as_ref();
        if self.source() == Some(source) {
            return false;
        }
        self.source = Some(source.to_path_buf());
        true
    }
}
