//! Shared constants used across the application.

/// Application name, used for the config directory and temp link names
pub const APP_NAME: &str = "agentlink";

/// Source document used when nothing else is configured (relative to the working directory)
pub const DEFAULT_SOURCE: &str = "AGENT.md";

/// Environment variable that overrides the source document
pub const SOURCE_ENV: &str = "AGENTLINK_SOURCE";

/// Environment variable that overrides the configuration file path
pub const CONFIG_ENV: &str = "AGENTLINK_CONFIG";

/// Label and location of the claude target
pub const CLAUDE_TARGET_NAME: &str = "claude";
pub const CLAUDE_DIR: &str = ".claude";
pub const CLAUDE_FILENAME: &str = "CLAUDE.md";

/// Label and location of the gemini target
pub const GEMINI_TARGET_NAME: &str = "gemini";
pub const GEMINI_DIR: &str = ".gemini";
pub const GEMINI_FILENAME: &str = "GEMINI.md";

/// Marker inserted between a target path and its backup timestamp
pub const BACKUP_MARKER: &str = "backup";

/// `chrono` format for backup timestamps
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
