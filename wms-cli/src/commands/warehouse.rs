//! Warehouse commands
//!
//! Commands: get, create, update, delete

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use wms_core::Warehouse;
use wms_store::WarehouseService;

use super::{ensure_valid, print_json, Context};

#[derive(Parser, Debug)]
pub struct WarehouseArgs {
    #[command(subcommand)]
    pub command: WarehouseCommands,
}

#[derive(Subcommand, Debug)]
pub enum WarehouseCommands {
    /// Show a warehouse
    Get {
        /// Warehouse ID
        id: String,
    },
    /// Create a warehouse with a generated ID
    Create(WarehouseFields),
    /// Replace every field of an existing warehouse
    Update {
        /// Warehouse ID
        id: String,
        #[command(flatten)]
        fields: WarehouseFields,
    },
    /// Delete a warehouse and everything stored in it
    Delete {
        /// Warehouse ID
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct WarehouseFields {
    /// Display name
    #[arg(long)]
    name: String,

    /// Latitude in degrees, -90 to 90
    #[arg(long, allow_negative_numbers = true)]
    latitude: f64,

    /// Longitude in degrees, -180 to 180
    #[arg(long, allow_negative_numbers = true)]
    longitude: f64,
}

impl WarehouseFields {
    fn into_warehouse(self, id: Option<String>) -> Warehouse {
        let mut warehouse = Warehouse::new(self.name, self.latitude, self.longitude);
        if let Some(id) = id {
            warehouse.id = id;
        }
        warehouse
    }
}

pub async fn run_warehouse(ctx: &Context, args: WarehouseArgs) -> Result<()> {
    match args.command {
        WarehouseCommands::Get { id } => {
            let service = WarehouseService::new(ctx.session().await?);
            print_json(&service.get_by_id(&id).await?)
        }
        WarehouseCommands::Create(fields) => {
            let warehouse = fields.into_warehouse(None);
            ensure_valid(warehouse.validate())?;
            let service = WarehouseService::new(ctx.session().await?);
            service.create(&warehouse).await?;
            info!(id = %warehouse.id, "warehouse created");
            print_json(&warehouse)
        }
        WarehouseCommands::Update { id, fields } => {
            let warehouse = fields.into_warehouse(Some(id));
            ensure_valid(warehouse.validate())?;
            let service = WarehouseService::new(ctx.session().await?);
            service.update(&warehouse).await?;
            print_json(&warehouse)
        }
        WarehouseCommands::Delete { id } => {
            let service = WarehouseService::new(ctx.session().await?);
            service.delete_by_id(&id).await?;
            info!(%id, "warehouse deleted");
            Ok(())
        }
    }
}
