//! Shelf block queries

use async_trait::async_trait;
use sqlx::FromRow;
use wms_core::ShelfBlock;

use super::PgQueries;
use crate::db::session::PgTx;

#[async_trait]
pub trait ShelfBlockQueries<Tx: Send>: Send + Sync {
    async fn get_shelf_block(&self, tx: &mut Tx, id: &str) -> Result<Option<ShelfBlock>, sqlx::Error>;

    async fn insert_shelf_block(&self, tx: &mut Tx, block: &ShelfBlock) -> Result<(), sqlx::Error>;

    async fn update_shelf_block(&self, tx: &mut Tx, block: &ShelfBlock) -> Result<u64, sqlx::Error>;

    async fn delete_shelf_block(&self, tx: &mut Tx, id: &str) -> Result<u64, sqlx::Error>;

    /// Parent lookup performed before every create/update.
    async fn warehouse_exists(&self, tx: &mut Tx, warehouse_id: &str) -> Result<bool, sqlx::Error>;
}

#[derive(Debug, FromRow)]
struct ShelfBlockRow {
    id: String,
    aisle: String,
    rack: String,
    storage_type: String,
    warehouse_id: String,
}

impl From<ShelfBlockRow> for ShelfBlock {
    fn from(row: ShelfBlockRow) -> Self {
        Self {
            id: row.id,
            aisle: row.aisle,
            rack: row.rack,
            storage_type: row.storage_type,
            warehouse_id: row.warehouse_id,
        }
    }
}

#[async_trait]
impl ShelfBlockQueries<PgTx> for PgQueries {
    async fn get_shelf_block(&self, tx: &mut PgTx, id: &str) -> Result<Option<ShelfBlock>, sqlx::Error> {
        let row: Option<ShelfBlockRow> = sqlx::query_as(
            "SELECT id, aisle, rack, storage_type, warehouse_id FROM shelf_block WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(ShelfBlock::from))
    }

    async fn insert_shelf_block(&self, tx: &mut PgTx, block: &ShelfBlock) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO shelf_block (id, aisle, rack, storage_type, warehouse_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&block.id)
        .bind(&block.aisle)
        .bind(&block.rack)
        .bind(&block.storage_type)
        .bind(&block.warehouse_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn update_shelf_block(&self, tx: &mut PgTx, block: &ShelfBlock) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE shelf_block
            SET aisle = $1, rack = $2, storage_type = $3, warehouse_id = $4
            WHERE id = $5
            "#,
        )
        .bind(&block.aisle)
        .bind(&block.rack)
        .bind(&block.storage_type)
        .bind(&block.warehouse_id)
        .bind(&block.id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_shelf_block(&self, tx: &mut PgTx, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shelf_block WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn warehouse_exists(&self, tx: &mut PgTx, warehouse_id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM warehouse WHERE id = $1)")
            .bind(warehouse_id)
            .fetch_one(&mut **tx)
            .await
    }
}
