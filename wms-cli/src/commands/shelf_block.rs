//! Shelf block commands
//!
//! Commands: get, create, update, delete

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use wms_core::ShelfBlock;
use wms_store::ShelfBlockService;

use super::{ensure_valid, print_json, Context};

#[derive(Parser, Debug)]
pub struct ShelfBlockArgs {
    #[command(subcommand)]
    pub command: ShelfBlockCommands,
}

#[derive(Subcommand, Debug)]
pub enum ShelfBlockCommands {
    /// Show a shelf block
    Get {
        /// Shelf block ID
        id: String,
    },
    /// Create a shelf block in an existing warehouse
    Create(ShelfBlockFields),
    /// Replace every field of an existing shelf block
    Update {
        /// Shelf block ID
        id: String,
        #[command(flatten)]
        fields: ShelfBlockFields,
    },
    /// Delete a shelf block and its shelves
    Delete {
        /// Shelf block ID
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct ShelfBlockFields {
    #[arg(long)]
    aisle: String,

    #[arg(long)]
    rack: String,

    /// e.g. regular, cold, frozen
    #[arg(long)]
    storage_type: String,

    /// Owning warehouse ID (must exist)
    #[arg(long)]
    warehouse_id: String,
}

impl ShelfBlockFields {
    fn into_shelf_block(self, id: Option<String>) -> ShelfBlock {
        let mut block = ShelfBlock::new(self.aisle, self.rack, self.storage_type, self.warehouse_id);
        if let Some(id) = id {
            block.id = id;
        }
        block
    }
}

pub async fn run_shelf_block(ctx: &Context, args: ShelfBlockArgs) -> Result<()> {
    match args.command {
        ShelfBlockCommands::Get { id } => {
            let service = ShelfBlockService::new(ctx.session().await?);
            print_json(&service.get_by_id(&id).await?)
        }
        ShelfBlockCommands::Create(fields) => {
            let block = fields.into_shelf_block(None);
            ensure_valid(block.validate())?;
            let service = ShelfBlockService::new(ctx.session().await?);
            service.create(&block).await?;
            info!(id = %block.id, "shelf block created");
            print_json(&block)
        }
        ShelfBlockCommands::Update { id, fields } => {
            let block = fields.into_shelf_block(Some(id));
            ensure_valid(block.validate())?;
            let service = ShelfBlockService::new(ctx.session().await?);
            service.update(&block).await?;
            print_json(&block)
        }
        ShelfBlockCommands::Delete { id } => {
            let service = ShelfBlockService::new(ctx.session().await?);
            service.delete_by_id(&id).await?;
            info!(%id, "shelf block deleted");
            Ok(())
        }
    }
}
