//! Structured logging setup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(LoggingError::UnknownLevel(other.to_string())),
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact text for terminals.
    #[default]
    Human,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` is not set.
    pub level: LogLevel,
    pub format: LogFormat,
}

impl LogConfig {
    /// Raise the level to at least `debug` (for `--verbose`).
    pub fn verbose(mut self) -> Self {
        self.level = self.level.min(LogLevel::Debug);
        self
    }

    /// The filter directive used when `RUST_LOG` is absent.
    pub fn default_directive(&self) -> String {
        format!("{lvl},turbo_storefront={lvl},turbo_data={lvl}", lvl = self.level)
    }
}

/// Errors from logging setup.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    #[error("failed to install subscriber: {0}")]
    Install(String),
}

/// Install the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `config.level`. Fails if a subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let json_layer = (config.format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (config.format == LogFormat::Human).then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_verbose_only_raises() {
        assert_eq!(LogConfig::default().verbose().level, LogLevel::Debug);
        let trace = LogConfig {
            level: LogLevel::Trace,
            ..Default::default()
        };
        assert_eq!(trace.verbose().level, LogLevel::Trace);
    }

    #[test]
    fn test_config_from_json() {
        let config: LogConfig = serde_json::from_str(r#"{"format":"json"}"#).unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, LogLevel::Warn);
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(
            LogConfig::default().default_directive(),
            "warn,turbo_storefront=warn,turbo_data=warn"
        );
    }
}
