// ─────────────────────────────────────────────────────────────────────
// SCPN Phantom Geometry — Logging
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Structured logging setup on top of `tracing-subscriber`.
//!
//! Library code only emits `tracing` events; binaries and notebooks that
//! drive the geometry call [`init_logging`] once.

use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{PhantomError, PhantomResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
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

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Machine-readable, one JSON object per event.
    Json,
    #[default]
    Pretty,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Include file:line of the event.
    pub source_location: bool,
    /// Directive string such as "phantom_core=debug". Overrides `level`.
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            source_location: false,
            filter: None,
        }
    }
}

impl LogConfig {
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            source_location: true,
            ..Default::default()
        }
    }

    pub fn production() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            ..Default::default()
        }
    }

    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Error,
            format: LogFormat::Compact,
            ..Default::default()
        }
    }

    /// Reject a `filter` that `EnvFilter` cannot parse.
    pub fn validate(&self) -> PhantomResult<()> {
        self.custom_filter().map(|_| ())
    }

    fn custom_filter(&self) -> PhantomResult<Option<EnvFilter>> {
        self.filter
            .as_deref()
            .map(|custom| {
                EnvFilter::try_new(custom).map_err(|e| {
                    PhantomError::ConfigError(format!("invalid log filter {custom:?}: {e}"))
                })
            })
            .transpose()
    }

    fn env_filter(&self) -> PhantomResult<EnvFilter> {
        match self.custom_filter()? {
            Some(filter) => Ok(filter),
            // Unset or unparsable RUST_LOG falls back to `level`.
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))),
        }
    }
}

/// Install the global subscriber.
///
/// A malformed `filter` is a `ConfigError`. If a subscriber is already
/// installed the call leaves it in place.
pub fn init_logging(config: &LogConfig) -> PhantomResult<()> {
    let filter = config.env_filter()?;
    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
    };

    if let Err(e) = result {
        debug!(error = %e, "global subscriber already installed; keeping it");
    }
    Ok(())
}
