//! Structured Logging
//!
//! Logging setup for tools built on the pulse engine, via the
//! `tracing` ecosystem: level filtering, JSON/pretty/compact output,
//! and `RUST_LOG`-style environment overrides. The numerical core
//! itself stays silent; only sweep and I/O paths emit debug events.
//!
//! ## Example
//!
//! ```rust,ignore
//! use qpulse_core::observe::{init_logging, LogConfig, LogLevel};
//!
//! let config = LogConfig {
//!     level: LogLevel::Debug,
//!     ..Default::default()
//! };
//! init_logging(&config);
//!
//! tracing::info!(duration = 160, "catalog sweep starting");
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (machine-readable)
    Json,
    /// Pretty format (human-readable, colored)
    Pretty,
    /// Compact format (one line per event)
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        LogFormat::Pretty
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include source location (file:line)
    pub source_location: bool,
    /// Module filter (e.g. "qpulse_core=debug")
    pub filter: Option<String>,
}

impl LogConfig {
    /// Development configuration (verbose, pretty).
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            source_location: true,
            ..Default::default()
        }
    }

    /// Production configuration (JSON, info).
    pub fn production() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            ..Default::default()
        }
    }

    /// Quiet configuration (errors only).
    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Error,
            format: LogFormat::Compact,
            ..Default::default()
        }
    }
}

/// Initialize the global logging subscriber.
///
/// Call once at startup; subsequent calls are silently ignored.
pub fn init_logging(config: &LogConfig) {
    let filter = if let Some(ref custom) = config.filter {
        EnvFilter::try_new(custom)
            .unwrap_or_else(|_| EnvFilter::new(format!("{}", config.level)))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{}", config.level)))
    };

    let result = match config.format {
        LogFormat::Json => {
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .json()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            );
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Pretty => {
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .pretty()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            );
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .compact()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            );
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    // Already-set subscriber means another init won the race.
    let _ = result;
}
