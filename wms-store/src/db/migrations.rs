//! Schema migrations for the four warehouse tables
//!
//! Repositories assume this schema is already in place; operators apply it
//! with `wms migrate up`. Foreign keys are declared so the store itself
//! rejects a dangling parent reference, whatever the isolation level.

use sqlx::PgPool;

const UP: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS warehouse (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        geolocation POINT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS shelf_block (
        id TEXT PRIMARY KEY,
        aisle TEXT NOT NULL,
        rack TEXT NOT NULL,
        storage_type TEXT NOT NULL,
        warehouse_id TEXT NOT NULL
            CONSTRAINT shelf_block_warehouse_id_fkey
            REFERENCES warehouse(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_shelf_block_warehouse_id ON shelf_block(warehouse_id)",
    r#"
    CREATE TABLE IF NOT EXISTS shelf (
        id TEXT PRIMARY KEY,
        label TEXT NOT NULL,
        section TEXT NOT NULL,
        level TEXT NOT NULL,
        shelf_block TEXT NOT NULL
            CONSTRAINT shelf_shelf_block_fkey
            REFERENCES shelf_block(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_shelf_shelf_block ON shelf(shelf_block)",
    r#"
    CREATE TABLE IF NOT EXISTS product (
        sku TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        mrp DOUBLE PRECISION NOT NULL,
        variant TEXT NOT NULL,
        length_in_cm DOUBLE PRECISION NOT NULL,
        width_in_cm DOUBLE PRECISION NOT NULL,
        height_in_cm DOUBLE PRECISION NOT NULL,
        weight_in_kg DOUBLE PRECISION NOT NULL,
        perishable BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
];

const DOWN: &[&str] = &[
    "DROP TABLE IF EXISTS shelf",
    "DROP TABLE IF EXISTS shelf_block",
    "DROP TABLE IF EXISTS warehouse",
    "DROP TABLE IF EXISTS product",
];

/// Create all tables and indexes. Idempotent.
pub async fn up(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running warehouse migrations...");
    run(pool, UP).await?;
    tracing::info!("Warehouse migrations complete");
    Ok(())
}

/// Drop all tables, children first.
pub async fn down(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Reverting warehouse migrations...");
    run(pool, DOWN).await?;
    tracing::info!("Warehouse tables dropped");
    Ok(())
}

// DDL is transactional in PostgreSQL, so a failed step leaves nothing half-applied
async fn run(pool: &PgPool, statements: &[&str]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in statements {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_drops_every_table_created_by_up() {
        let created: Vec<&str> = UP
            .iter()
            .filter_map(|s| s.split("CREATE TABLE IF NOT EXISTS ").nth(1))
            .filter_map(|rest| rest.split_whitespace().next())
            .collect();

        assert_eq!(created, ["warehouse", "shelf_block", "shelf", "product"]);
        for table in created {
            assert!(DOWN.iter().any(|s| s.ends_with(table)), "{table} not dropped");
        }
    }

    #[test]
    fn children_are_dropped_before_parents() {
        let position = |table: &str| DOWN.iter().position(|s| s.ends_with(table)).unwrap();
        assert!(position(" shelf") < position(" shelf_block"));
        assert!(position(" shelf_block") < position(" warehouse"));
    }
}
