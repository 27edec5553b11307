//! Warehouse: root of the storage hierarchy

use serde::{Deserialize, Serialize};

use super::{generate_id, ValidationErrors};

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Warehouse {
    /// Create a warehouse with a freshly generated identifier.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Check the name and coordinate ranges.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.require_non_empty("id", &self.id);
        errors.require_non_empty("name", &self.name);
        errors.require_range("latitude", self.latitude, LATITUDE_RANGE.0, LATITUDE_RANGE.1);
        errors.require_range(
            "longitude",
            self.longitude,
            LONGITUDE_RANGE.0,
            LONGITUDE_RANGE.1,
        );
        errors.into_result()
    }
}
