//! wms CLI - warehouse catalog storage administration
//!
//! Provides:
//! - Schema migrations (`migrate up|down`)
//! - CRUD over warehouses, shelf blocks, shelves and products, printed as JSON
//!
//! Exit codes: 0 success, 2 entity not found, 3 invalid parent reference,
//! 1 anything else.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use wms_core::Config;
use wms_store::{ErrorKind, StoreError};

mod commands;
mod tracing_setup;

use commands::Context;
use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "wms",
    author,
    version,
    about = "Warehouse, shelf and product catalog storage",
    long_about = "Manage the warehouse catalog in PostgreSQL. Every command runs in a single \
                  transaction; parent references are checked before anything is written."
)]
struct Cli {
    /// Config file (TOML); defaults to ~/.wms/config.toml, then DB_* environment variables
    #[arg(long, short = 'c', global = true, env = "WMS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply or revert the database schema
    Migrate(commands::migrate::MigrateArgs),
    /// Manage warehouses
    Warehouse(commands::warehouse::WarehouseArgs),
    /// Manage shelf blocks (aisle/rack groups inside a warehouse)
    ShelfBlock(commands::shelf_block::ShelfBlockArgs),
    /// Manage shelves inside a shelf block
    Shelf(commands::shelf::ShelfArgs),
    /// Manage the product catalog
    Product(commands::product::ProductArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Resolved up front for the log level; a failure is reported only once a
    // command actually needs the database
    let config = Config::load(cli.config.as_deref());
    let tracing_config = TracingConfig {
        debug: cli.debug,
        level: config.as_ref().ok().map(|config| config.log_level.clone()),
    };
    if let Err(err) = init_tracing(&tracing_config) {
        eprintln!("Warning: logging disabled: {err:#}");
    }

    // Dropping the command future on Ctrl-C rolls back its open transaction
    let outcome = tokio::select! {
        result = run(cli.command, Context::new(config)) => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, transaction abandoned");
            return ExitCode::from(130);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code(&err)
        }
    }
}

async fn run(command: Commands, ctx: Context) -> Result<()> {
    match command {
        Commands::Migrate(args) => commands::run_migrate(&ctx, args).await,
        Commands::Warehouse(args) => commands::run_warehouse(&ctx, args).await,
        Commands::ShelfBlock(args) => commands::run_shelf_block(&ctx, args).await,
        Commands::Shelf(args) => commands::run_shelf(&ctx, args).await,
        Commands::Product(args) => commands::run_product(&ctx, args).await,
    }
}

fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<StoreError>().map(StoreError::kind) {
        Some(ErrorKind::NotFound) => ExitCode::from(2),
        Some(ErrorKind::IntegrityViolation) => ExitCode::from(3),
        _ => ExitCode::FAILURE,
    }
}
