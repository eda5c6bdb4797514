//! Console reporting with bracketed level tags.
//!
//! Informational and success lines go to stdout; warnings and errors go to stderr.

use std::fmt;

/// Severity of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Success,
    Error,
}

impl Level {
    pub fn tag(self) -> &'static str {
        match self {
            Level::Info => "[INFO]",
            Level::Warn => "[WARN]",
            Level::Success => "[SUCCESS]",
            Level::Error => "[ERROR]",
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Level::Warn | Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Formats a single report line.
pub fn line(level: Level, message: impl fmt::Display) -> String {
    format!("{} {}", level, message)
}

pub fn emit(level: Level, message: impl fmt::Display) {
    let text = line(level, message);
    if level.to_stderr() {
        eprintln!("{}", text);
    } else {
        println!("{}", text);
    }
}

pub fn info(message: impl fmt::Display) {
    emit(Level::Info, message);
}

pub fn warn(message: impl fmt::Display) {
    emit(Level::Warn, message);
}

pub fn success(message: impl fmt::Display) {
    emit(Level::Success, message);
}

pub fn error(message: impl fmt::Display) {
    emit(Level::Error, message);
}
