//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - Environment variables (through CLI arguments)
//! - CLI arguments

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::clipboard::Ownership;

pub mod types;

pub use types::{ClipboardConfig, LoggingConfig, SessionConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Clipboard configuration
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    /// Converter session configuration
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Default config file location: `<config_dir>/lamco-xscp/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lamco-xscp")
            .join("config.toml")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match self.clipboard.backend.as_str() {
            "system" | "memory" => {}
            _ => anyhow::bail!("Invalid clipboard backend: {}", self.clipboard.backend),
        }

        match self.clipboard.hold.as_str() {
            "until-replaced" | "linger" => {}
            _ => anyhow::bail!("Invalid clipboard hold mode: {}", self.clipboard.hold),
        }

        if self.clipboard.copy_timeout_ms == 0 {
            anyhow::bail!("clipboard.copy_timeout_ms must be greater than 0");
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => {}
            _ => anyhow::bail!("Invalid log format: {}", self.logging.format),
        }

        Ok(())
    }

    /// Apply CLI overrides
    pub fn with_overrides(mut self, backend: Option<String>, copy_timeout_ms: Option<u64>) -> Self {
        if let Some(backend) = backend {
            self.clipboard.backend = backend;
        }
        if let Some(ms) = copy_timeout_ms {
            self.clipboard.copy_timeout_ms = ms;
        }
        self
    }

    /// Copy timeout as a duration
    pub fn copy_timeout(&self) -> Duration {
        Duration::from_millis(self.clipboard.copy_timeout_ms)
    }

    /// Linger period as a duration
    pub fn linger(&self) -> Duration {
        Duration::from_millis(self.clipboard.linger_ms)
    }

    /// Ownership policy for the system clipboard backend
    pub fn ownership(&self) -> Ownership {
        match self.clipboard.hold.as_str() {
            "linger" => Ownership::Linger(self.linger()),
            _ => Ownership::UntilReplaced,
        }
    }

    /// Feedback window as a duration
    pub fn feedback_window(&self) -> Duration {
        Duration::from_millis(self.session.feedback_ms)
    }
}
