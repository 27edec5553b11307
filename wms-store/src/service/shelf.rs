//! Shelf service
//!
//! Same discipline as shelf blocks, one level down: the referenced shelf
//! block is checked inside the write's transaction.

use tracing::{debug, instrument};
use wms_core::Shelf;

use super::{finish, require_affected};
use crate::db::{PgQueries, PgSession, Session, ShelfQueries};
use crate::error::{is_foreign_key_violation, Result, StoreError};

pub struct ShelfService<S = PgSession, Q = PgQueries> {
    session: S,
    queries: Q,
}

impl ShelfService {
    pub fn new(session: PgSession) -> Self {
        Self::with_queries(session, PgQueries)
    }
}

impl<S, Q> ShelfService<S, Q> {
    pub fn with_queries(session: S, queries: Q) -> Self {
        Self { session, queries }
    }
}

impl<S, Q> ShelfService<S, Q>
where
    S: Session,
    Q: ShelfQueries<S::Tx>,
{
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Shelf> {
        let mut tx = self.session.begin().await?;
        let result = match self.queries.get_shelf(&mut tx, id).await {
            Ok(Some(shelf)) => Ok(shelf),
            Ok(None) => Err(StoreError::ShelfDoesNotExist(id.to_owned())),
            Err(err) => Err(err.into()),
        };
        finish(tx, result).await
    }

    #[instrument(skip(self, shelf), fields(id = %shelf.id, shelf_block_id = %shelf.shelf_block_id))]
    pub async fn create(&self, shelf: &Shelf) -> Result<()> {
        let mut tx = self.session.begin().await?;
        let result = self.create_in(&mut tx, shelf).await;
        finish(tx, result).await
    }

    #[instrument(skip(self, shelf), fields(id = %shelf.id, shelf_block_id = %shelf.shelf_block_id))]
    pub async fn update(&self, shelf: &Shelf) -> Result<()> {
        let mut tx = self.session.begin().await?;
        let result = self.update_in(&mut tx, shelf).await;
        finish(tx, result).await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let mut tx = self.session.begin().await?;
        let result = match self.queries.delete_shelf(&mut tx, id).await {
            Ok(affected) => {
                require_affected(affected, || StoreError::ShelfDoesNotExist(id.to_owned()))
            }
            Err(err) => Err(err.into()),
        };
        finish(tx, result).await
    }

    async fn create_in(&self, tx: &mut S::Tx, shelf: &Shelf) -> Result<()> {
        self.require_shelf_block(tx, shelf).await?;
        self.queries
            .insert_shelf(tx, shelf)
            .await
            .map_err(|err| invalid_shelf_block_or(err, shelf))
    }

    async fn update_in(&self, tx: &mut S::Tx, shelf: &Shelf) -> Result<()> {
        self.require_shelf_block(tx, shelf).await?;
        let affected = self
            .queries
            .update_shelf(tx, shelf)
            .await
            .map_err(|err| invalid_shelf_block_or(err, shelf))?;
        require_affected(affected, || StoreError::ShelfDoesNotExist(shelf.id.clone()))
    }

    async fn require_shelf_block(&self, tx: &mut S::Tx, shelf: &Shelf) -> Result<()> {
        if self.queries.shelf_block_exists(tx, &shelf.shelf_block_id).await? {
            Ok(())
        } else {
            debug!("referenced shelf block does not exist");
            Err(StoreError::InvalidShelfBlock(shelf.shelf_block_id.clone()))
        }
    }
}

fn invalid_shelf_block_or(err: sqlx::Error, shelf: &Shelf) -> StoreError {
    if is_foreign_key_violation(&err) {
        debug!("shelf block removed between check and write");
        StoreError::InvalidShelfBlock(shelf.shelf_block_id.clone())
    } else {
        err.into()
    }
}
