//! Product queries, keyed by SKU

use async_trait::async_trait;
use sqlx::FromRow;
use wms_core::Product;

use super::PgQueries;
use crate::db::session::PgTx;

#[async_trait]
pub trait ProductQueries<Tx: Send>: Send + Sync {
    async fn get_product(&self, tx: &mut Tx, sku: &str) -> Result<Option<Product>, sqlx::Error>;

    async fn insert_product(&self, tx: &mut Tx, product: &Product) -> Result<(), sqlx::Error>;

    async fn update_product(&self, tx: &mut Tx, product: &Product) -> Result<u64, sqlx::Error>;

    async fn delete_product(&self, tx: &mut Tx, sku: &str) -> Result<u64, sqlx::Error>;
}

#[derive(Debug, FromRow)]
struct ProductRow {
    sku: String,
    name: String,
    mrp: f64,
    variant: String,
    length_in_cm: f64,
    width_in_cm: f64,
    height_in_cm: f64,
    weight_in_kg: f64,
    perishable: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            sku: row.sku,
            name: row.name,
            mrp: row.mrp,
            variant: row.variant,
            length_cm: row.length_in_cm,
            width_cm: row.width_in_cm,
            height_cm: row.height_in_cm,
            weight_kg: row.weight_in_kg,
            perishable: row.perishable,
        }
    }
}

#[async_trait]
impl ProductQueries<PgTx> for PgQueries {
    async fn get_product(&self, tx: &mut PgTx, sku: &str) -> Result<Option<Product>, sqlx::Error> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT sku, name, mrp, variant, length_in_cm, width_in_cm,
                   height_in_cm, weight_in_kg, perishable
            FROM product
            WHERE sku = $1
            "#,
        )
        .bind(sku)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(Product::from))
    }

    async fn insert_product(&self, tx: &mut PgTx, product: &Product) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO product (sku, name, mrp, variant, length_in_cm, width_in_cm,
                                 height_in_cm, weight_in_kg, perishable)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(product.mrp)
        .bind(&product.variant)
        .bind(product.length_cm)
        .bind(product.width_cm)
        .bind(product.height_cm)
        .bind(product.weight_kg)
        .bind(product.perishable)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn update_product(&self, tx: &mut PgTx, product: &Product) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE product
            SET name = $2, mrp = $3, variant = $4, length_in_cm = $5, width_in_cm = $6,
                height_in_cm = $7, weight_in_kg = $8, perishable = $9
            WHERE sku = $1
            "#,
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(product.mrp)
        .bind(&product.variant)
        .bind(product.length_cm)
        .bind(product.width_cm)
        .bind(product.height_cm)
        .bind(product.weight_kg)
        .bind(product.perishable)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_product(&self, tx: &mut PgTx, sku: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product WHERE sku = $1")
            .bind(sku)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
