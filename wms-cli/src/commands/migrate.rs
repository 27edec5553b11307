//! Schema migration commands
//!
//! Commands: up, down

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use wms_store::migrations;

use super::Context;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub command: MigrateCommands,
}

#[derive(Subcommand, Debug)]
pub enum MigrateCommands {
    /// Create the warehouse, shelf_block, shelf and product tables
    Up,
    /// Drop all tables (destroys data)
    Down,
}

pub async fn run_migrate(ctx: &Context, args: MigrateArgs) -> Result<()> {
    let session = ctx.session().await?;
    match args.command {
        MigrateCommands::Up => migrations::up(session.pool())
            .await
            .context("Failed to apply migrations")?,
        MigrateCommands::Down => migrations::down(session.pool())
            .await
            .context("Failed to revert migrations")?,
    }
    Ok(())
}
