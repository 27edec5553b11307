//! Warehouse service
//!
//! Warehouses are the root of the hierarchy, so writes carry no
//! parent check. Insert failures (duplicate ids included) propagate as
//! infrastructure errors; id uniqueness is the caller's concern.

use tracing::instrument;
use wms_core::Warehouse;

use super::{finish, require_affected};
use crate::db::{PgQueries, PgSession, Session, WarehouseQueries};
use crate::error::{Result, StoreError};

pub struct WarehouseService<S = PgSession, Q = PgQueries> {
    session: S,
    queries: Q,
}

impl WarehouseService {
    pub fn new(session: PgSession) -> Self {
        Self::with_queries(session, PgQueries)
    }
}

impl<S, Q> WarehouseService<S, Q> {
    pub fn with_queries(session: S, queries: Q) -> Self {
        Self { session, queries }
    }
}

impl<S, Q> WarehouseService<S, Q>
where
    S: Session,
    Q: WarehouseQueries<S::Tx>,
{
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Warehouse> {
        let mut tx = self.session.begin().await?;
        let result = match self.queries.get_warehouse(&mut tx, id).await {
            Ok(Some(warehouse)) => Ok(warehouse),
            Ok(None) => Err(StoreError::WarehouseDoesNotExist(id.to_owned())),
            Err(err) => Err(err.into()),
        };
        finish(tx, result).await
    }

    #[instrument(skip(self, warehouse), fields(id = %warehouse.id))]
    pub async fn create(&self, warehouse: &Warehouse) -> Result<()> {
        let mut tx = self.session.begin().await?;
        let result = self
            .queries
            .insert_warehouse(&mut tx, warehouse)
            .await
            .map_err(StoreError::from);
        finish(tx, result).await
    }

    /// Replace every mutable field of an existing warehouse.
    #[instrument(skip(self, warehouse), fields(id = %warehouse.id))]
    pub async fn update(&self, warehouse: &Warehouse) -> Result<()> {
        let mut tx = self.session.begin().await?;
        let result = match self.queries.update_warehouse(&mut tx, warehouse).await {
            Ok(affected) => require_affected(affected, || {
                StoreError::WarehouseDoesNotExist(warehouse.id.clone())
            }),
            Err(err) => Err(err.into()),
        };
        finish(tx, result).await
    }

    /// Remove a warehouse; its shelf blocks and shelves go with it.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let mut tx = self.session.begin().await?;
        let result = match self.queries.delete_warehouse(&mut tx, id).await {
            Ok(affected) => {
                require_affected(affected, || StoreError::WarehouseDoesNotExist(id.to_owned()))
            }
            Err(err) => Err(err.into()),
        };
        finish(tx, result).await
    }
}
