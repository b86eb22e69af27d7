use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Top-level configuration loaded from `parley.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the chat backend, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

/// Logging configuration (`[logging]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "warn" or "parley=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: "pretty", "json", or "compact"
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Write logs to a file under ~/.parley/logs instead of stderr.
    /// The TUI takes over the terminal, so this defaults to on.
    #[serde(default = "default_log_to_file")]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: default_log_format(), file: default_log_to_file() }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Example configuration written on first run
    pub fn example() -> &'static str {
        r#"# Parley configuration

[backend]
# Base URL of the chat backend (no trailing slash)
base_url = "http://127.0.0.1:8000"

[logging]
# Filter directive, like RUST_LOG: "warn", "info", "parley=debug", ...
level = "warn"
# "pretty", "json", or "compact"
format = "compact"
# Log to ~/.parley/logs instead of stderr (keeps the TUI clean)
file = true
"#
    }
}
