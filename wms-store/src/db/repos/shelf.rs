//! Shelf queries
//!
//! The parent column is named `shelf_block` in the schema.

use async_trait::async_trait;
use sqlx::FromRow;
use wms_core::Shelf;

use super::PgQueries;
use crate::db::session::PgTx;

#[async_trait]
pub trait ShelfQueries<Tx: Send>: Send + Sync {
    async fn get_shelf(&self, tx: &mut Tx, id: &str) -> Result<Option<Shelf>, sqlx::Error>;

    async fn insert_shelf(&self, tx: &mut Tx, shelf: &Shelf) -> Result<(), sqlx::Error>;

    async fn update_shelf(&self, tx: &mut Tx, shelf: &Shelf) -> Result<u64, sqlx::Error>;

    async fn delete_shelf(&self, tx: &mut Tx, id: &str) -> Result<u64, sqlx::Error>;

    async fn shelf_block_exists(&self, tx: &mut Tx, shelf_block_id: &str) -> Result<bool, sqlx::Error>;
}

#[derive(Debug, FromRow)]
struct ShelfRow {
    id: String,
    label: String,
    section: String,
    level: String,
    shelf_block: String,
}

impl From<ShelfRow> for Shelf {
    fn from(row: ShelfRow) -> Self {
        Self {
            id: row.id,
            label: row.label,
            section: row.section,
            level: row.level,
            shelf_block_id: row.shelf_block,
        }
    }
}

#[async_trait]
impl ShelfQueries<PgTx> for PgQueries {
    async fn get_shelf(&self, tx: &mut PgTx, id: &str) -> Result<Option<Shelf>, sqlx::Error> {
        let row: Option<ShelfRow> = sqlx::query_as(
            "SELECT id, label, section, level, shelf_block FROM shelf WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(Shelf::from))
    }

    async fn insert_shelf(&self, tx: &mut PgTx, shelf: &Shelf) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO shelf (id, label, section, level, shelf_block) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&shelf.id)
        .bind(&shelf.label)
        .bind(&shelf.section)
        .bind(&shelf.level)
        .bind(&shelf.shelf_block_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn update_shelf(&self, tx: &mut PgTx, shelf: &Shelf) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE shelf SET label = $1, section = $2, level = $3, shelf_block = $4 WHERE id = $5",
        )
        .bind(&shelf.label)
        .bind(&shelf.section)
        .bind(&shelf.level)
        .bind(&shelf.shelf_block_id)
        .bind(&shelf.id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_shelf(&self, tx: &mut PgTx, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shelf WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn shelf_block_exists(&self, tx: &mut PgTx, shelf_block_id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM shelf_block WHERE id = $1)")
            .bind(shelf_block_id)
            .fetch_one(&mut **tx)
            .await
    }
}
