//! Shelf commands
//!
//! Commands: get, create, update, delete

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use wms_core::Shelf;
use wms_store::ShelfService;

use super::{ensure_valid, print_json, Context};

#[derive(Parser, Debug)]
pub struct ShelfArgs {
    #[command(subcommand)]
    pub command: ShelfCommands,
}

#[derive(Subcommand, Debug)]
pub enum ShelfCommands {
    /// Show a shelf
    Get {
        /// Shelf ID
        id: String,
    },
    /// Create a shelf in an existing shelf block
    Create(ShelfFields),
    /// Replace every field of an existing shelf
    Update {
        /// Shelf ID
        id: String,
        #[command(flatten)]
        fields: ShelfFields,
    },
    /// Delete a shelf
    Delete {
        /// Shelf ID
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct ShelfFields {
    #[arg(long)]
    label: String,

    #[arg(long)]
    section: String,

    #[arg(long)]
    level: String,

    /// Owning shelf block ID (must exist)
    #[arg(long)]
    shelf_block_id: String,
}

impl ShelfFields {
    fn into_shelf(self, id: Option<String>) -> Shelf {
        let mut shelf = Shelf::new(self.label, self.section, self.level, self.shelf_block_id);
        if let Some(id) = id {
            shelf.id = id;
        }
        shelf
    }
}

pub async fn run_shelf(ctx: &Context, args: ShelfArgs) -> Result<()> {
    match args.command {
        ShelfCommands::Get { id } => {
            let service = ShelfService::new(ctx.session().await?);
            print_json(&service.get_by_id(&id).await?)
        }
        ShelfCommands::Create(fields) => {
            let shelf = fields.into_shelf(None);
            ensure_valid(shelf.validate())?;
            let service = ShelfService::new(ctx.session().await?);
            service.create(&shelf).await?;
            info!(id = %shelf.id, "shelf created");
            print_json(&shelf)
        }
        ShelfCommands::Update { id, fields } => {
            let shelf = fields.into_shelf(Some(id));
            ensure_valid(shelf.validate())?;
            let service = ShelfService::new(ctx.session().await?);
            service.update(&shelf).await?;
            print_json(&shelf)
        }
        ShelfCommands::Delete { id } => {
            let service = ShelfService::new(ctx.session().await?);
            service.delete_by_id(&id).await?;
            info!(%id, "shelf deleted");
            Ok(())
        }
    }
}
