//! Error taxonomy for the storage layer
//!
//! Three classes of outcome reach callers:
//! - not found: the targeted entity is absent
//! - integrity violation: a create/update referenced a missing parent
//! - infrastructure: any other storage failure, passed through untouched

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("warehouse does not exist: '{0}'")]
    WarehouseDoesNotExist(String),

    #[error("shelf block does not exist: '{0}'")]
    ShelfBlockDoesNotExist(String),

    #[error("shelf does not exist: '{0}'")]
    ShelfDoesNotExist(String),

    #[error("product does not exist: '{0}'")]
    ProductDoesNotExist(String),

    /// Carries the rejected `warehouse_id`, not the id of the block being written.
    #[error("invalid warehouse: '{0}'")]
    InvalidWarehouse(String),

    /// Carries the rejected `shelf_block_id`.
    #[error("invalid shelf block: '{0}'")]
    InvalidShelfBlock(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Coarse classification for callers that map errors to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    IntegrityViolation,
    Infrastructure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("not found"),
            Self::IntegrityViolation => f.write_str("integrity violation"),
            Self::Infrastructure => f.write_str("infrastructure"),
        }
    }
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WarehouseDoesNotExist(_)
            | Self::ShelfBlockDoesNotExist(_)
            | Self::ShelfDoesNotExist(_)
            | Self::ProductDoesNotExist(_) => ErrorKind::NotFound,
            Self::InvalidWarehouse(_) | Self::InvalidShelfBlock(_) => {
                ErrorKind::IntegrityViolation
            }
            Self::Database(_) => ErrorKind::Infrastructure,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_integrity_violation(&self) -> bool {
        self.kind() == ErrorKind::IntegrityViolation
    }

    /// The underlying driver error, if this is an infrastructure failure.
    pub fn as_database(&self) -> Option<&sqlx::Error> {
        match self {
            Self::Database(err) => Some(err),
            _ => None,
        }
    }
}

/// True when the store rejected a statement because a foreign key has no
/// matching parent row.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(
            StoreError::WarehouseDoesNotExist("W1".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            StoreError::InvalidShelfBlock("B1".into()).kind(),
            ErrorKind::IntegrityViolation
        );
        assert_eq!(
            StoreError::Database(sqlx::Error::PoolClosed).kind(),
            ErrorKind::Infrastructure
        );
    }

    #[test]
    fn integrity_errors_name_the_reference() {
        let err = StoreError::InvalidWarehouse("does-not-exist".into());
        assert_eq!(err.to_string(), "invalid warehouse: 'does-not-exist'");
        assert!(err.is_integrity_violation());
        assert!(!err.is_not_found());
    }

    #[test]
    fn database_errors_are_transparent() {
        let inner = sqlx::Error::PoolClosed;
        let expected = inner.to_string();
        let err = StoreError::from(inner);
        assert_eq!(err.to_string(), expected);
        assert!(matches!(err.as_database(), Some(sqlx::Error::PoolClosed)));
    }
}
