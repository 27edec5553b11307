//! Shelf block: an aisle/rack unit inside a warehouse

use serde::{Deserialize, Serialize};

use super::{generate_id, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfBlock {
    pub id: String,
    pub aisle: String,
    pub rack: String,
    pub storage_type: String,
    /// References `Warehouse::id`; must exist at write time.
    pub warehouse_id: String,
}

impl ShelfBlock {
    pub fn new(
        aisle: impl Into<String>,
        rack: impl Into<String>,
        storage_type: impl Into<String>,
        warehouse_id: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            aisle: aisle.into(),
            rack: rack.into(),
            storage_type: storage_type.into(),
            warehouse_id: warehouse_id.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.require_non_empty("id", &self.id);
        errors.require_non_empty("aisle", &self.aisle);
        errors.require_non_empty("rack", &self.rack);
        errors.require_non_empty("storageType", &self.storage_type);
        errors.require_non_empty("warehouseId", &self.warehouse_id);
        errors.into_result()
    }
}
