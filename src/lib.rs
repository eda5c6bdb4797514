//! A Rust library for linking one agent instruction document into the
//! per-user configuration paths of external coding agents.
//!
//! [`Installer`] converges each [`Target`] to a symlink pointing at the
//! source document (backing up anything else found there) and can revert
//! that again.

pub mod config;
pub mod constants;
pub mod error;
pub mod installer;
pub mod report;
pub mod symlinks;
pub mod targets;

pub use config::{get_config_file_path, load_config, save_config, source_or_default, Config};
pub use error::{Error, Result};
pub use installer::{
    resolve_source, InstallOutcome, InstallReport, Installer, TargetReport, TargetStatus,
    UninstallOutcome, UninstallReport,
};
pub use targets::{default_targets, default_targets_in, LinkState, Target};
