//! Tracing setup for the wms CLI
//!
//! Usage:
//!   wms --debug ...              # Debug logging
//!   RUST_LOG=wms_store=debug wms # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                     # Log filter, wins over everything else
//!   LOG_LEVEL                    # Default level when RUST_LOG is unset (default: info)
//!
//! Logs go to stderr so command output on stdout stays valid JSON.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Log at debug unless RUST_LOG is set
    pub debug: bool,
    /// Fallback level, usually from LOG_LEVEL
    pub level: Option<String>,
}

impl TracingConfig {
    fn default_directive(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            self.level.as_deref().unwrap_or("info")
        }
    }
}

pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_directive()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_beats_level() {
        let config = TracingConfig {
            debug: true,
            level: Some("warn".into()),
        };
        assert_eq!(config.default_directive(), "debug");
    }

    #[test]
    fn level_falls_back_to_info() {
        assert_eq!(TracingConfig::default().default_directive(), "info");

        let config = TracingConfig {
            debug: false,
            level: Some("warn".into()),
        };
        assert_eq!(config.default_directive(), "warn");
    }
}
