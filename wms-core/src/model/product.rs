//! Product catalog entry
//!
//! Products live outside the warehouse hierarchy and are keyed by a
//! caller-supplied SKU rather than a generated identifier.

use serde::{Deserialize, Serialize};

use super::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub sku: String,
    pub name: String,
    /// Maximum retail price
    pub mrp: f64,
    pub variant: String,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub perishable: bool,
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        mrp: f64,
        variant: impl Into<String>,
        length_cm: f64,
        width_cm: f64,
        height_cm: f64,
        weight_kg: f64,
        perishable: bool,
    ) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            mrp,
            variant: variant.into(),
            length_cm,
            width_cm,
            height_cm,
            weight_kg,
            perishable,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.require_non_empty("sku", &self.sku);
        errors.require_non_empty("name", &self.name);
        errors.require_non_negative("mrp", self.mrp);
        errors.require_non_negative("lengthCm", self.length_cm);
        errors.require_non_negative("widthCm", self.width_cm);
        errors.require_non_negative("heightCm", self.height_cm);
        errors.require_non_negative("weightKg", self.weight_kg);
        errors.into_result()
    }
}
