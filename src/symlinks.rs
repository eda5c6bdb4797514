//! Low-level symlink operations: backups, atomic replacement and verification.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::{APP_NAME, BACKUP_MARKER};

/// Returns a free backup path of the form `<path>.backup.<stamp>`.
///
/// If that name is already taken, `.1`, `.2`, ... is appended until a free
/// name is found.
pub fn backup_path(path: &Path, stamp: &str) -> PathBuf {
    let mut base = path.as_os_str().to_os_string();
    base.push(format!(".{}.{}", BACKUP_MARKER, stamp));

    let candidate = PathBuf::from(&base);
    if !occupied(&candidate) {
        return candidate;
    }

    let mut n = 1u32;
    loop {
        let mut name = base.clone();
        name.push(format!(".{}", n));
        let candidate = PathBuf::from(name);
        if !occupied(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Moves whatever is at `path` to a fresh backup location and returns that location.
pub fn back_up(path: &Path, stamp: &str) -> io::Result<PathBuf> {
    let backup = backup_path(path, stamp);
    fs::rename(path, &backup)?;
    Ok(backup)
}

/// Moves `backup` back to `path`, undoing [`back_up`].
///
/// A symlink left at `path` by a failed link attempt is removed first.
///
/// # Errors
///
/// Returns an error if `path` is still occupied by something other than a
/// symlink, or if the rename fails. The backup then stays where it is.
pub fn restore_backup(backup: &Path, path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink()) {
        fs::remove_file(path)?;
    }
    if occupied(path) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} is occupied", path.display()),
        ));
    }
    fs::rename(backup, path)
}

/// Points `link` at `source`, replacing any existing entry at `link` atomically.
///
/// The new link is created at a sibling temporary path and renamed over
/// `link`, so `link` is never observed missing.
///
/// # Errors
///
/// Returns an error if the temporary link cannot be created or the rename fails.
/// The temporary link is cleaned up on failure.
pub fn replace_with_symlink(source: &Path, link: &Path) -> io::Result<()> {
    let tmp = temp_link_path(link);

    // leftover from an interrupted run
    match fs::remove_file(&tmp) {
        Ok(()) => tracing::debug!(path = %tmp.display(), "removed stale temporary link"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    create_platform_symlink(source, &tmp)?;

    if let Err(e) = fs::rename(&tmp, link) {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            tracing::warn!(
                path = %tmp.display(),
                error = %cleanup,
                "failed to clean up temporary link"
            );
        }
        return Err(e);
    }
    Ok(())
}

/// Checks that `link` is a symlink to `source` and can be read through.
///
/// Returns a human-readable reason when the check fails.
pub fn verify_link(source: &Path, link: &Path) -> Result<(), String> {
    let meta = fs::symlink_metadata(link).map_err(|e| format!("link is missing: {}", e))?;
    if !meta.file_type().is_symlink() {
        return Err("path is not a symlink".to_string());
    }

    let destination = fs::read_link(link).map_err(|e| format!("cannot read link: {}", e))?;
    if destination != source {
        return Err(format!(
            "link points to {} instead of {}",
            destination.display(),
            source.display()
        ));
    }

    check_readable(link).map_err(|e| format!("link is not readable: {}", e))
}

/// Returns the destination of `path` if it is a symlink.
pub fn link_destination(path: &Path) -> io::Result<Option<PathBuf>> {
    match fs::read_link(path) {
        Ok(dest) => Ok(Some(dest)),
        Err(e) if e.kind() == io::ErrorKind::InvalidInput => Ok(None),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn temp_link_path(link: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(link.file_name().unwrap_or_else(|| OsStr::new("link")));
    name.push(format!(".{}-{}.tmp", APP_NAME, std::process::id()));
    match link.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Creates a platform-specific symlink.
///
/// # Arguments
///
/// * `source` - Path to the source file
/// * `target` - Path where the symlink should be created
fn create_platform_symlink(source: &Path, target: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, target)?;
    }

    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_file(source, target)?;
    }

    Ok(())
}

#[cfg(unix)]
fn check_readable(path: &Path) -> io::Result<()> {
    use nix::unistd::{access, AccessFlags};
    access(path, AccessFlags::R_OK).map_err(io::Error::from)
}

#[cfg(not(unix))]
fn check_readable(path: &Path) -> io::Result<()> {
    fs::File::open(path).map(|_| ())
}
