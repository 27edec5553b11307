//! Shelf block service
//!
//! Create and update verify the referenced warehouse inside the same
//! transaction before writing. The check alone is racy under the default
//! isolation level; the schema's foreign key closes the gap, and its
//! violation is reported as the same `InvalidWarehouse` error.

use tracing::{debug, instrument};
use wms_core::ShelfBlock;

use super::{finish, require_affected};
use crate::db::{PgQueries, PgSession, Session, ShelfBlockQueries};
use crate::error::{is_foreign_key_violation, Result, StoreError};

pub struct ShelfBlockService<S = PgSession, Q = PgQueries> {
    session: S,
    queries: Q,
}

impl ShelfBlockService {
    pub fn new(session: PgSession) -> Self {
        Self::with_queries(session, PgQueries)
    }
}

impl<S, Q> ShelfBlockService<S, Q> {
    pub fn with_queries(session: S, queries: Q) -> Self {
        Self { session, queries }
    }
}

impl<S, Q> ShelfBlockService<S, Q>
where
    S: Session,
    Q: ShelfBlockQueries<S::Tx>,
{
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<ShelfBlock> {
        let mut tx = self.session.begin().await?;
        let result = match self.queries.get_shelf_block(&mut tx, id).await {
            Ok(Some(block)) => Ok(block),
            Ok(None) => Err(StoreError::ShelfBlockDoesNotExist(id.to_owned())),
            Err(err) => Err(err.into()),
        };
        finish(tx, result).await
    }

    #[instrument(skip(self, block), fields(id = %block.id, warehouse_id = %block.warehouse_id))]
    pub async fn create(&self, block: &ShelfBlock) -> Result<()> {
        let mut tx = self.session.begin().await?;
        let result = self.create_in(&mut tx, block).await;
        finish(tx, result).await
    }

    #[instrument(skip(self, block), fields(id = %block.id, warehouse_id = %block.warehouse_id))]
    pub async fn update(&self, block: &ShelfBlock) -> Result<()> {
        let mut tx = self.session.begin().await?;
        let result = self.update_in(&mut tx, block).await;
        finish(tx, result).await
    }

    /// Remove a shelf block and its shelves.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let mut tx = self.session.begin().await?;
        let result = match self.queries.delete_shelf_block(&mut tx, id).await {
            Ok(affected) => {
                require_affected(affected, || StoreError::ShelfBlockDoesNotExist(id.to_owned()))
            }
            Err(err) => Err(err.into()),
        };
        finish(tx, result).await
    }

    async fn create_in(&self, tx: &mut S::Tx, block: &ShelfBlock) -> Result<()> {
        self.require_warehouse(tx, block).await?;
        self.queries
            .insert_shelf_block(tx, block)
            .await
            .map_err(|err| invalid_warehouse_or(err, block))
    }

    async fn update_in(&self, tx: &mut S::Tx, block: &ShelfBlock) -> Result<()> {
        self.require_warehouse(tx, block).await?;
        let affected = self
            .queries
            .update_shelf_block(tx, block)
            .await
            .map_err(|err| invalid_warehouse_or(err, block))?;
        require_affected(affected, || StoreError::ShelfBlockDoesNotExist(block.id.clone()))
    }

    async fn require_warehouse(&self, tx: &mut S::Tx, block: &ShelfBlock) -> Result<()> {
        if self.queries.warehouse_exists(tx, &block.warehouse_id).await? {
            Ok(())
        } else {
            debug!("referenced warehouse does not exist");
            Err(StoreError::InvalidWarehouse(block.warehouse_id.clone()))
        }
    }
}

fn invalid_warehouse_or(err: sqlx::Error, block: &ShelfBlock) -> StoreError {
    if is_foreign_key_violation(&err) {
        debug!("warehouse removed between check and write");
        StoreError::InvalidWarehouse(block.warehouse_id.clone())
    } else {
        err.into()
    }
}
