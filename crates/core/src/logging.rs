//! Logging setup on the tracing ecosystem.
//!
//! Configured via the `[logging]` section of `parley.toml`, with env
//! overrides:
//!
//! - `PARLEY_LOG`: filter directive (like `RUST_LOG`), e.g. `parley=debug`
//! - `PARLEY_LOG_FORMAT`: `pretty`, `json`, `compact`
//!
//! The TUI runs on the alternate screen, so by default logs go to a daily
//! rolling file under `~/.parley/logs/` rather than stderr.

use std::env;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty, human-readable multi-line output
    Pretty,
    /// JSON output (one line per event)
    Json,
    /// Compact, single-line output (default)
    #[default]
    Compact,
}

impl LogFormat {
    pub const VALUES: &[LogFormat] = &[LogFormat::Pretty, LogFormat::Json, LogFormat::Compact];

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

/// Output format: `PARLEY_LOG_FORMAT` wins over the config file
fn resolve_format(config: &LoggingConfig) -> LogFormat {
    env::var("PARLEY_LOG_FORMAT")
        .ok()
        .and_then(|s| LogFormat::parse_str(&s))
        .or_else(|| LogFormat::parse_str(&config.format))
        .unwrap_or_default()
}

/// Directory for file logs: `~/.parley/logs`
fn log_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| Error::Config("could not determine home directory".to_string()))?;
    Ok(home.join(".parley").join("logs"))
}

/// Initialize the global tracing subscriber.
///
/// Returns a [`WorkerGuard`] when file logging is active; the caller must
/// hold it for the process lifetime or buffered events are lost on exit.
pub fn init_logging(config: Option<LoggingConfig>) -> Result<Option<WorkerGuard>> {
    let config = config.unwrap_or_default();

    let directive = env::var("PARLEY_LOG").unwrap_or_else(|_| config.level.clone());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| Error::Config(format!("invalid log filter '{}': {}", directive, e)))?;

    let format = resolve_format(&config);

    let init_err = |e: tracing_subscriber::util::TryInitError| Error::Other(format!("logging init failed: {}", e));

    if config.file {
        let dir = log_dir()?;
        std::fs::create_dir_all(&dir)?;
        let appender = tracing_appender::rolling::daily(dir, "parley.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let registry = tracing_subscriber::registry().with(filter);
        match format {
            LogFormat::Pretty => registry
                .with(fmt::layer().with_writer(writer).with_ansi(false).pretty())
                .try_init()
                .map_err(init_err)?,
            LogFormat::Json => registry
                .with(fmt::layer().with_writer(writer).with_ansi(false).json())
                .try_init()
                .map_err(init_err)?,
            LogFormat::Compact => registry
                .with(fmt::layer().with_writer(writer).with_ansi(false).compact())
                .try_init()
                .map_err(init_err)?,
        }
        Ok(Some(guard))
    } else {
        let registry = tracing_subscriber::registry().with(filter);
        match format {
            LogFormat::Pretty => registry
                .with(fmt::layer().with_writer(std::io::stderr).pretty())
                .try_init()
                .map_err(init_err)?,
            LogFormat::Json => registry
                .with(fmt::layer().with_writer(std::io::stderr).json())
                .try_init()
                .map_err(init_err)?,
            LogFormat::Compact => registry
                .with(fmt::layer().with_writer(std::io::stderr).compact())
                .try_init()
                .map_err(init_err)?,
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse_str("pretty"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse_str("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse_str("Compact"), Some(LogFormat::Compact));
        assert_eq!(LogFormat::parse_str("verbose"), None);
    }

    #[test]
    fn test_log_format_as_str_roundtrip() {
        for format in LogFormat::VALUES {
            assert_eq!(LogFormat::parse_str(format.as_str()), Some(*format));
        }
    }

    #[test]
    fn test_log_format_default() {
        assert_eq!(LogFormat::default(), LogFormat::Compact);
    }

    #[test]
    fn test_resolve_format_env_override() {
        let config = LoggingConfig { format: "pretty".to_string(), ..Default::default() };
        assert_eq!(resolve_format(&config), LogFormat::Pretty);

        // No other test touches this variable
        unsafe { env::set_var("PARLEY_LOG_FORMAT", "json") };
        assert_eq!(resolve_format(&config), LogFormat::Json);

        unsafe { env::set_var("PARLEY_LOG_FORMAT", "not-a-format") };
        assert_eq!(resolve_format(&config), LogFormat::Pretty);

        unsafe { env::remove_var("PARLEY_LOG_FORMAT") };
    }
}
