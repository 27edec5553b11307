//! Database layer - connection pool, sessions and queries
//!
//! # Design Principles
//!
//! - One pooled handle, injected into every service; no global connection
//! - One transaction per service call, committed or rolled back exactly once
//! - Parent existence is checked inside the write's transaction, and the
//!   schema's foreign keys reject anything that slips past the check

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod session;

pub use memory::{MemoryQueries, MemorySession, MemoryTx};
pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use session::{PgSession, PgTx, Session, Transaction};
