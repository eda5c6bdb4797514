//! The link installer: converges target paths to symlinks at a source document, or reverts that.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, warn};

use crate::constants::BACKUP_TIMESTAMP_FORMAT;
use crate::error::{Error, Result};
use crate::symlinks::{
    back_up, link_destination, replace_with_symlink, restore_backup, verify_link,
};
use crate::targets::{LinkState, Target};

/// What install did to a single target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The path was absent and now links to the source
    Linked,
    /// An existing symlink was replaced
    Relinked,
    /// A non-symlink entry was moved to `backup` before linking
    BackedUp { backup: PathBuf },
}

/// What uninstall did to a single target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallOutcome {
    Removed,
    SkippedNotSymlink,
    NothingToRemove,
}

/// Observed state of a single target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetStatus {
    pub state: LinkState,
    /// Where the link points, for symlinks
    pub destination: Option<PathBuf>,
}

impl TargetStatus {
    /// Whether this target is a symlink pointing exactly at `source`.
    pub fn points_to(&self, source: &Path) -> bool {
        self.destination.as_deref() == Some(source)
    }
}

/// Per-target result of an installer operation.
#[derive(Debug)]
pub struct TargetReport<T> {
    pub target: Target,
    pub result: Result<T>,
}

/// Results of an install run.
#[derive(Debug)]
pub struct InstallReport {
    /// Canonical absolute path every target was linked to
    pub source: PathBuf,
    pub targets: Vec<TargetReport<InstallOutcome>>,
}

impl InstallReport {
    pub fn all_succeeded(&self) -> bool {
        self.targets.iter().all(|t| t.result.is_ok())
    }

    pub fn failure_count(&self) -> usize {
        self.targets.iter().filter(|t| t.result.is_err()).count()
    }
}

/// Results of an uninstall run.
#[derive(Debug)]
pub struct UninstallReport {
    pub targets: Vec<TargetReport<UninstallOutcome>>,
}

impl UninstallReport {
    pub fn all_succeeded(&self) -> bool {
        self.targets.iter().all(|t| t.result.is_ok())
    }
}

/// Manages symlinks from a fixed set of targets to one source document.
#[derive(Debug, Clone)]
pub struct Installer {
    targets: Vec<Target>,
}

impl Installer {
    pub fn new(targets: Vec<Target>) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Links every target to `source`.
    ///
    /// # Behavior
    ///
    /// - The source is resolved to a canonical absolute path before any target is touched
    /// - Missing parent directories of each target are created
    /// - A non-symlink entry at a target is renamed to `<target>.backup.<YYYYMMDD_HHMMSS>`
    /// - An existing symlink is replaced atomically
    /// - Each link is verified after creation
    ///
    /// A failure on one target does not stop the others; per-target results are
    /// collected in the returned [`InstallReport`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceNotFound`] or [`Error::SourceNotAFile`] before any
    /// mutation if the source is unusable.
    pub fn install<P: AsRef<Path>>(&self, source: P) -> Result<InstallReport> {
        let source = resolve_source(source.as_ref())?;
        let stamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        debug!(source = %source.display(), %stamp, "installing links");

        let targets = self
            .targets
            .iter()
            .map(|target| TargetReport {
                target: target.clone(),
                result: install_target(target, &source, &stamp),
            })
            .collect();

        Ok(InstallReport { source, targets })
    }

    /// Removes every target that is a symlink. Other entries are left untouched.
    pub fn uninstall(&self) -> UninstallReport {
        let targets = self
            .targets
            .iter()
            .map(|target| TargetReport {
                target: target.clone(),
                result: uninstall_target(target),
            })
            .collect();

        UninstallReport { targets }
    }

    /// Observes every target without modifying anything.
    pub fn status(&self) -> Vec<TargetReport<TargetStatus>> {
        self.targets
            .iter()
            .map(|target| TargetReport {
                target: target.clone(),
                result: target_status(target).map_err(Error::from),
            })
            .collect()
    }
}

/// Resolves `source` to a canonical absolute path of an existing regular file.
///
/// # Errors
///
/// - [`Error::SourceNotFound`] if nothing exists at `source` (or it is a dangling link)
/// - [`Error::SourceNotAFile`] if it exists but is not a regular file
pub fn resolve_source(source: &Path) -> Result<PathBuf> {
    let resolved = match fs::canonicalize(source) {
        Ok(path) => path,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::SourceNotFound {
                path: source.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    if !resolved.is_file() {
        return Err(Error::SourceNotAFile { path: resolved });
    }
    Ok(resolved)
}

fn install_target(target: &Target, source: &Path, stamp: &str) -> Result<InstallOutcome> {
    let path = &target.path;
    let fail = |e: io::Error| Error::link_failed(&target.name, path, e);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(fail)?;
    }

    let outcome = match target.state().map_err(fail)? {
        LinkState::Absent => InstallOutcome::Linked,
        LinkState::Symlink => InstallOutcome::Relinked,
        LinkState::RegularFile => {
            let backup = back_up(path, stamp).map_err(fail)?;
            debug!(name = %target.name, backup = %backup.display(), "backed up existing file");
            InstallOutcome::BackedUp { backup }
        }
    };

    let linked = replace_with_symlink(source, path)
        .map_err(|e| e.to_string())
        .and_then(|()| verify_link(source, path));

    if let Err(reason) = linked {
        let reason = match &outcome {
            InstallOutcome::BackedUp { backup } => match restore_backup(backup, path) {
                Ok(()) => format!("{}; original restored", reason),
                Err(e) => {
                    warn!(
                        name = %target.name,
                        backup = %backup.display(),
                        error = %e,
                        "could not restore backup"
                    );
                    format!("{}; original kept at {}", reason, backup.display())
                }
            },
            _ => reason,
        };
        return Err(Error::link_failed(&target.name, path, reason));
    }

    debug!(name = %target.name, path = %path.display(), ?outcome, "linked");
    Ok(outcome)
}

fn uninstall_target(target: &Target) -> Result<UninstallOutcome> {
    let fail = |e: io::Error| Error::removal_failed(&target.name, &target.path, e);

    let outcome = match target.state().map_err(fail)? {
        LinkState::Symlink => {
            fs::remove_file(&target.path).map_err(fail)?;
            UninstallOutcome::Removed
        }
        LinkState::RegularFile => UninstallOutcome::SkippedNotSymlink,
        LinkState::Absent => UninstallOutcome::NothingToRemove,
    };

    debug!(name = %target.name, ?outcome, "uninstalled");
    Ok(outcome)
}

fn target_status(target: &Target) -> io::Result<TargetStatus> {
    let state = target.state()?;
    let destination = match state {
        LinkState::Symlink => link_destination(&target.path)?,
        _ => None,
    };
    Ok(TargetStatus { state, destination })
}
