//! # Observability
//!
//! Tracing initialisation and sequencing metrics.
//!
//! ## Features
//!
//! - Tracing setup (JSON / Pretty / Compact)
//! - `metrics` facade counters for sequencing and correction passes
//! - Running statistics shared with the timing model
//!
//! ## Example
//!
//! ```ignore
//! observability::init_with_config(ObservabilityConfig::default())?;
//! observability::record_sequence_pass(forward.len(), reverse.len(), fallbacks);
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// Re-exports
pub use crate::metrics::{
    record_correction_pass, record_fallback, record_sequence_pass, record_sink_write,
    RunningStats, StatsSummary,
};

/// Initialise tracing with the default configuration
pub fn init() -> Result<()> {
    init_with_config(ObservabilityConfig::default())
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log format
    pub log_format: LogFormat,
    /// Default log level, used when `RUST_LOG` is unset
    pub default_log_level: String,
    /// Ignore `RUST_LOG` and use `default_log_level` as is
    pub force_level: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            default_log_level: "info".to_string(),
            force_level: false,
        }
    }
}

/// Log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs
    Json,
    /// Human readable
    #[default]
    Pretty,
    /// Compact single line
    Compact,
}

/// Initialise with a custom configuration
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let filter = if config.force_level {
        EnvFilter::new(&config.default_log_level)
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.default_log_level))
    };

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
        LogFormat::Compact => fmt::layer().compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(log_format = ?config.log_format, "Observability initialized");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.default_log_level, "info");
        assert!(!config.force_level);
    }
}
