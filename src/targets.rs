//! Target descriptors and link-state observation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::constants::{
    CLAUDE_DIR, CLAUDE_FILENAME, CLAUDE_TARGET_NAME, GEMINI_DIR, GEMINI_FILENAME,
    GEMINI_TARGET_NAME,
};
use crate::error::{Error, Result};

/// A named location an external tool reads its instructions from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Label used in messages
    pub name: String,
    /// Filesystem path of the link
    pub path: PathBuf,
}

impl Target {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Observes what currently occupies this target's path.
    pub fn state(&self) -> io::Result<LinkState> {
        LinkState::probe(&self.path)
    }
}

/// What currently occupies a target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Absent,
    Symlink,
    /// Anything present that is not a symlink, directories included
    RegularFile,
}

impl LinkState {
    /// Inspects `path` without following symlinks, so a dangling link is still `Symlink`.
    pub fn probe(path: &Path) -> io::Result<Self> {
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_symlink() => Ok(LinkState::Symlink),
            Ok(_) => Ok(LinkState::RegularFile),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(LinkState::Absent),
            // a non-directory ancestor means nothing can live at `path`
            Err(e) if is_not_a_directory(&e) => Ok(LinkState::Absent),
            Err(e) => Err(e),
        }
    }
}

#[cfg(unix)]
fn is_not_a_directory(e: &io::Error) -> bool {
    e.raw_os_error() == Some(nix::errno::Errno::ENOTDIR as i32)
}

#[cfg(not(unix))]
fn is_not_a_directory(_e: &io::Error) -> bool {
    false
}

/// Returns the two fixed targets resolved against `home`.
pub fn default_targets_in<P: AsRef<Path>>(home: P) -> Vec<Target> {
    let home = home.as_ref();
    vec![
        Target::new(
            CLAUDE_TARGET_NAME,
            home.join(CLAUDE_DIR).join(CLAUDE_FILENAME),
        ),
        Target::new(
            GEMINI_TARGET_NAME,
            home.join(GEMINI_DIR).join(GEMINI_FILENAME),
        ),
    ]
}

/// Returns the two fixed targets for the current user.
///
/// # Errors
///
/// Returns [`Error::HomeDirNotFound`] if no home directory can be determined.
pub fn default_targets() -> Result<Vec<Target>> {
    let base = BaseDirs::new().ok_or(Error::HomeDirNotFound)?;
    Ok(default_targets_in(base.home_dir()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_targets_layout() {
        let targets = default_targets_in("/home/someone");
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].name, "claude");
        assert_eq!(
            targets[0].path,
            PathBuf::from("/home/someone/.claude/CLAUDE.md")
        );
        assert_eq!(targets[1].name, "gemini");
        assert_eq!(
            targets[1].path,
            PathBuf::from("/home/someone/.gemini/GEMINI.md")
        );
    }

    #[test]
    fn test_probe_absent() {
        let dir = tempdir().unwrap();
        let state = LinkState::probe(&dir.path().join("missing.md")).unwrap();
        assert_eq!(state, LinkState::Absent);
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_under_regular_file_is_absent() {
        let dir = tempdir().unwrap();
        let parent = dir.path().join(".claude");
        fs::write(&parent, "not a directory").unwrap();

        let state = LinkState::probe(&parent.join("CLAUDE.md")).unwrap();
        assert_eq!(state, LinkState::Absent);
    }

    #[test]
    fn test_probe_regular_file_and_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.md");
        fs::write(&file, "content").unwrap();
        assert_eq!(LinkState::probe(&file).unwrap(), LinkState::RegularFile);
        assert_eq!(LinkState::probe(dir.path()).unwrap(), LinkState::RegularFile);
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_dangling_symlink() {
        let dir = tempdir().unwrap();
        let link = dir.path().join("link.md");
        std::os::unix::fs::symlink(dir.path().join("gone.md"), &link).unwrap();

        let target = Target::new("test", &link);
        assert_eq!(target.state().unwrap(), LinkState::Symlink);
    }
}
