//! Transaction-scoped queries, one trait per entity
//!
//! Each trait is generic over the transaction type so a service can run
//! against PostgreSQL ([`PgQueries`]) or the in-memory store
//! ([`crate::db::memory::MemoryQueries`]). Queries report raw outcomes
//! (`Option`, rows affected, existence); mapping them to domain errors is
//! the services' job.

pub mod product;
pub mod shelf;
pub mod shelf_block;
pub mod warehouse;

pub use product::ProductQueries;
pub use shelf::ShelfQueries;
pub use shelf_block::ShelfBlockQueries;
pub use warehouse::WarehouseQueries;

/// PostgreSQL implementation of every queries trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgQueries;
