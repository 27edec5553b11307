//! Per-entity service facades
//!
//! Each service owns a [`Session`](crate::db::Session) and a queries
//! implementation. Every public operation opens one transaction, runs its
//! existence checks and statement through it, maps the raw outcome to a
//! [`StoreError`], and finishes the transaction via [`finish`].

pub mod product;
pub mod shelf;
pub mod shelf_block;
pub mod warehouse;

pub use product::ProductService;
pub use shelf::ShelfService;
pub use shelf_block::ShelfBlockService;
pub use warehouse::WarehouseService;

use tracing::{debug, warn};

use crate::db::Transaction;
use crate::error::StoreError;

/// Commit on success, roll back on error. Exactly one of the two runs.
///
/// A failed rollback is logged and the original error is returned; a
/// failed commit surfaces as [`StoreError::Database`].
pub(crate) async fn finish<Tx, T>(tx: Tx, result: Result<T, StoreError>) -> Result<T, StoreError>
where
    Tx: Transaction,
{
    match result {
        Ok(value) => {
            tx.commit().await?;
            debug!("transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "rollback failed");
            }
            debug!(error = %err, kind = %err.kind(), "transaction rolled back");
            Err(err)
        }
    }
}

/// Map a zero-row outcome to the entity's not-found error.
pub(crate) fn require_affected(affected: u64, not_found: impl FnOnce() -> StoreError) -> Result<(), StoreError> {
    if affected == 0 {
        Err(not_found())
    } else {
        Ok(())
    }
}
