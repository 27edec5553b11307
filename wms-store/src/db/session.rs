//! Transaction provider
//!
//! Services receive a [`Session`] at construction and open exactly one
//! transaction per operation. No isolation level is requested; the
//! store's default applies.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres};

/// A transaction on the PostgreSQL pool.
pub type PgTx = sqlx::Transaction<'static, Postgres>;

/// An open transaction. Both outcomes consume it, so it can finish once only.
///
/// Dropping an unfinished transaction rolls it back. This is how a
/// cancelled caller (dropped future, elapsed `tokio::time::timeout`)
/// releases it.
#[async_trait]
pub trait Transaction: Send + Sized {
    async fn commit(self) -> Result<(), sqlx::Error>;
    async fn rollback(self) -> Result<(), sqlx::Error>;
}

#[async_trait]
pub trait Session: Send + Sync {
    type Tx: Transaction;

    async fn begin(&self) -> Result<Self::Tx, sqlx::Error>;
}

#[async_trait]
impl Transaction for PgTx {
    async fn commit(self) -> Result<(), sqlx::Error> {
        sqlx::Transaction::commit(self).await
    }

    async fn rollback(self) -> Result<(), sqlx::Error> {
        sqlx::Transaction::rollback(self).await
    }
}

/// Session backed by a pooled PostgreSQL handle.
///
/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct PgSession {
    pool: PgPool,
}

impl PgSession {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Session for PgSession {
    type Tx = PgTx;

    async fn begin(&self) -> Result<PgTx, sqlx::Error> {
        self.pool.begin().await
    }
}
