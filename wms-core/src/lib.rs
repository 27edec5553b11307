//! wms-core: domain model and configuration for the warehouse management service
//!
//! The storage layer (`wms-store`) persists these types; this crate has no
//! database dependency of its own.

pub mod config;
pub mod error;
pub mod model;

pub use config::{Config, PostgresConfig};
pub use error::{Result, WmsError};
pub use model::{Product, Shelf, ShelfBlock, ValidationError, ValidationErrors, Warehouse};
