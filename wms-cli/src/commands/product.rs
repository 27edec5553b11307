//! Product catalog commands
//!
//! Commands: get, create, update, delete. Products are keyed by SKU, which
//! the caller supplies.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use wms_core::Product;
use wms_store::ProductService;

use super::{ensure_valid, print_json, Context};

#[derive(Parser, Debug)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Show a product
    Get {
        /// Stock keeping unit
        sku: String,
    },
    /// Add a product to the catalog
    Create(ProductFields),
    /// Replace every field of an existing product
    Update(ProductFields),
    /// Remove a product from the catalog
    Delete {
        /// Stock keeping unit
        sku: String,
    },
}

#[derive(Args, Debug)]
pub struct ProductFields {
    /// Stock keeping unit
    sku: String,

    #[arg(long)]
    name: String,

    /// Maximum retail price
    #[arg(long, allow_negative_numbers = true)]
    mrp: f64,

    /// Variant, e.g. pack size
    #[arg(long, default_value = "")]
    variant: String,

    /// Length in cm
    #[arg(long, allow_negative_numbers = true)]
    length: f64,

    /// Width in cm
    #[arg(long, allow_negative_numbers = true)]
    width: f64,

    /// Height in cm
    #[arg(long, allow_negative_numbers = true)]
    height: f64,

    /// Weight in kg
    #[arg(long, allow_negative_numbers = true)]
    weight: f64,

    /// Requires cold-chain handling
    #[arg(long)]
    perishable: bool,
}

impl From<ProductFields> for Product {
    fn from(fields: ProductFields) -> Self {
        Product::new(
            fields.sku,
            fields.name,
            fields.mrp,
            fields.variant,
            fields.length,
            fields.width,
            fields.height,
            fields.weight,
            fields.perishable,
        )
    }
}

pub async fn run_product(ctx: &Context, args: ProductArgs) -> Result<()> {
    match args.command {
        ProductCommands::Get { sku } => {
            let service = ProductService::new(ctx.session().await?);
            print_json(&service.get_by_id(&sku).await?)
        }
        ProductCommands::Create(fields) => {
            let product = Product::from(fields);
            ensure_valid(product.validate())?;
            let service = ProductService::new(ctx.session().await?);
            service.create(&product).await?;
            info!(sku = %product.sku, "product created");
            print_json(&product)
        }
        ProductCommands::Update(fields) => {
            let product = Product::from(fields);
            ensure_valid(product.validate())?;
            let service = ProductService::new(ctx.session().await?);
            service.update(&product).await?;
            print_json(&product)
        }
        ProductCommands::Delete { sku } => {
            let service = ProductService::new(ctx.session().await?);
            service.delete_by_id(&sku).await?;
            info!(%sku, "product deleted");
            Ok(())
        }
    }
}
