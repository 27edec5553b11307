//! Warehouse queries
//!
//! The geolocation column is a Postgres `point(longitude, latitude)`.

use async_trait::async_trait;
use sqlx::FromRow;
use wms_core::Warehouse;

use super::PgQueries;
use crate::db::session::PgTx;

#[async_trait]
pub trait WarehouseQueries<Tx: Send>: Send + Sync {
    async fn get_warehouse(&self, tx: &mut Tx, id: &str) -> Result<Option<Warehouse>, sqlx::Error>;

    async fn insert_warehouse(&self, tx: &mut Tx, warehouse: &Warehouse) -> Result<(), sqlx::Error>;

    /// Returns the number of rows replaced.
    async fn update_warehouse(&self, tx: &mut Tx, warehouse: &Warehouse) -> Result<u64, sqlx::Error>;

    /// Returns the number of rows removed.
    async fn delete_warehouse(&self, tx: &mut Tx, id: &str) -> Result<u64, sqlx::Error>;
}

#[derive(Debug, FromRow)]
struct WarehouseRow {
    id: String,
    name: String,
    latitude: f64,
    longitude: f64,
}

impl From<WarehouseRow> for Warehouse {
    fn from(row: WarehouseRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

#[async_trait]
impl WarehouseQueries<PgTx> for PgQueries {
    async fn get_warehouse(&self, tx: &mut PgTx, id: &str) -> Result<Option<Warehouse>, sqlx::Error> {
        let row: Option<WarehouseRow> = sqlx::query_as(
            r#"
            SELECT id, name, geolocation[1] AS latitude, geolocation[0] AS longitude
            FROM warehouse
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(Warehouse::from))
    }

    async fn insert_warehouse(&self, tx: &mut PgTx, warehouse: &Warehouse) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO warehouse (id, name, geolocation) VALUES ($1, $2, point($3, $4))")
            .bind(&warehouse.id)
            .bind(&warehouse.name)
            .bind(warehouse.longitude)
            .bind(warehouse.latitude)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn update_warehouse(&self, tx: &mut PgTx, warehouse: &Warehouse) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE warehouse SET name = $1, geolocation = point($2, $3) WHERE id = $4",
        )
        .bind(&warehouse.name)
        .bind(warehouse.longitude)
        .bind(warehouse.latitude)
        .bind(&warehouse.id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_warehouse(&self, tx: &mut PgTx, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM warehouse WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
