//! wms-store: transactional storage for the warehouse catalog
//!
//! Services wrap every operation in a single transaction, verify parent
//! references inside it, and report outcomes through [`StoreError`].

pub mod db;
pub mod error;
pub mod service;

pub use db::migrations;
pub use db::{create_pool, create_pool_with_options, MemoryQueries, MemorySession, PgQueries, PgSession};
pub use error::{ErrorKind, Result, StoreError};
pub use service::{ProductService, ShelfBlockService, ShelfService, WarehouseService};
