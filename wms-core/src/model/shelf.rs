use serde::{Deserialize, Serialize};

use super::{generate_id, ValidationErrors};

/// A single shelf inside a shelf block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelf {
    pub id: String,
    pub label: String,
    pub section: String,
    pub level: String,
    /// References `ShelfBlock::id`; must exist at write time.
    pub shelf_block_id: String,
}

impl Shelf {
    pub fn new(
        label: impl Into<String>,
        section: impl Into<String>,
        level: impl Into<String>,
        shelf_block_id: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            label: label.into(),
            section: section.into(),
            level: level.into(),
            shelf_block_id: shelf_block_id.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.require_non_empty("id", &self.id);
        errors.require_non_empty("label", &self.label);
        errors.require_non_empty("section", &self.section);
        errors.require_non_empty("level", &self.level);
        errors.require_non_empty("shelfBlockId", &self.shelf_block_id);
        errors.into_result()
    }
}
