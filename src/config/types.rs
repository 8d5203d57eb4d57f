//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::clipboard::system::DEFAULT_LINGER_MS;
use crate::clipboard::DEFAULT_COPY_TIMEOUT_MS;

/// Clipboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Allow clipboard writes at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Clipboard backend ("system", "memory")
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Maximum milliseconds to wait for the copy event before giving up
    #[serde(default = "default_copy_timeout_ms")]
    pub copy_timeout_ms: u64,

    /// How long the system backend keeps clipboard ownership after a
    /// commit ("until-replaced", "linger")
    #[serde(default = "default_hold")]
    pub hold: String,

    /// Ownership period in "linger" mode, in milliseconds. 0 releases
    /// immediately.
    #[serde(default = "default_linger_ms")]
    pub linger_ms: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: default_backend(),
            copy_timeout_ms: default_copy_timeout_ms(),
            hold: default_hold(),
            linger_ms: default_linger_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_backend() -> String {
    "system".to_string()
}

fn default_copy_timeout_ms() -> u64 {
    DEFAULT_COPY_TIMEOUT_MS
}

fn default_hold() -> String {
    "until-replaced".to_string()
}

fn default_linger_ms() -> u64 {
    DEFAULT_LINGER_MS
}

/// Converter session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long the "copied" indicator stays on, in milliseconds
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,

    /// Show the "copied" indicator for transactions the platform could not
    /// confirm
    #[serde(default = "default_true")]
    pub optimistic_feedback: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            feedback_ms: default_feedback_ms(),
            optimistic_feedback: true,
        }
    }
}

fn default_feedback_ms() -> u64 {
    2000
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format ("pretty", "compact", "json")
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Also write logs to this file
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}
