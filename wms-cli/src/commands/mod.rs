//! Command implementations for the wms CLI
//!
//! Every subcommand validates its input first, then asks [`Context`] for a
//! session. Nothing touches configuration or the network until the input
//! is known to be well formed.

pub mod migrate;
pub mod product;
pub mod shelf;
pub mod shelf_block;
pub mod warehouse;

use anyhow::{anyhow, Context as _, Result};
use serde::Serialize;
use tracing::debug;
use wms_core::{Config, ValidationErrors, WmsError};
use wms_store::{create_pool, PgSession};

pub use migrate::run_migrate;
pub use product::run_product;
pub use shelf::run_shelf;
pub use shelf_block::run_shelf_block;
pub use warehouse::run_warehouse;

/// Holds the configuration outcome and connects on demand. A load error
/// surfaces only when a command asks for a session.
#[derive(Debug)]
pub struct Context {
    config: std::result::Result<Config, WmsError>,
}

impl Context {
    pub fn new(config: std::result::Result<Config, WmsError>) -> Self {
        Self { config }
    }

    fn config(&self) -> Result<&Config> {
        self.config
            .as_ref()
            .map_err(|err| anyhow!("{err}"))
            .context("Failed to load configuration")
    }

    pub async fn session(&self) -> Result<PgSession> {
        let config = self.config()?;
        debug!(postgres = ?config.postgres, "configuration loaded");

        let pool = create_pool(&config.postgres).await.with_context(|| {
            format!(
                "Failed to connect to {}:{}/{}",
                config.postgres.host, config.postgres.port, config.postgres.db_name
            )
        })?;
        Ok(PgSession::new(pool))
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Reject invalid input before any connection is made.
pub(crate) fn ensure_valid(result: Result<(), ValidationErrors>) -> Result<()> {
    result.context("Invalid input")
}
