//! Warehouse domain entities
//!
//! Plain value types shared by the storage layer and its callers.
//! Identifiers are opaque strings: UUIDs generated at construction for
//! the hierarchy, caller-supplied SKUs for products.

pub mod product;
pub mod shelf;
pub mod shelf_block;
pub mod validation;
pub mod warehouse;

pub use product::Product;
pub use shelf::Shelf;
pub use shelf_block::ShelfBlock;
pub use validation::{ValidationError, ValidationErrors};
pub use warehouse::Warehouse;

/// Generate a fresh identifier for a hierarchy entity.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
