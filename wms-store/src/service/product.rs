//! Product service
//!
//! Products are standalone: no parent checks, only the commit/rollback
//! and affected-row discipline shared by every service.

use tracing::instrument;
use wms_core::Product;

use super::{finish, require_affected};
use crate::db::{PgQueries, PgSession, ProductQueries, Session};
use crate::error::{Result, StoreError};

pub struct ProductService<S = PgSession, Q = PgQueries> {
    session: S,
    queries: Q,
}

impl ProductService {
    pub fn new(session: PgSession) -> Self {
        Self::with_queries(session, PgQueries)
    }
}

impl<S, Q> ProductService<S, Q> {
    pub fn with_queries(session: S, queries: Q) -> Self {
        Self { session, queries }
    }
}

impl<S, Q> ProductService<S, Q>
where
    S: Session,
    Q: ProductQueries<S::Tx>,
{
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, sku: &str) -> Result<Product> {
        let mut tx = self.session.begin().await?;
        let result = match self.queries.get_product(&mut tx, sku).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(StoreError::ProductDoesNotExist(sku.to_owned())),
            Err(err) => Err(err.into()),
        };
        finish(tx, result).await
    }

    #[instrument(skip(self, product), fields(sku = %product.sku))]
    pub async fn create(&self, product: &Product) -> Result<()> {
        let mut tx = self.session.begin().await?;
        let result = self
            .queries
            .insert_product(&mut tx, product)
            .await
            .map_err(StoreError::from);
        finish(tx, result).await
    }

    #[instrument(skip(self, product), fields(sku = %product.sku))]
    pub async fn update(&self, product: &Product) -> Result<()> {
        let mut tx = self.session.begin().await?;
        let result = match self.queries.update_product(&mut tx, product).await {
            Ok(affected) => {
                require_affected(affected, || StoreError::ProductDoesNotExist(product.sku.clone()))
            }
            Err(err) => Err(err.into()),
        };
        finish(tx, result).await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, sku: &str) -> Result<()> {
        let mut tx = self.session.begin().await?;
        let result = match self.queries.delete_product(&mut tx, sku).await {
            Ok(affected) => {
                require_affected(affected, || StoreError::ProductDoesNotExist(sku.to_owned()))
            }
            Err(err) => Err(err.into()),
        };
        finish(tx, result).await
    }
}
