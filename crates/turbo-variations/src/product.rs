//! Product draft and submission payload.

use serde::{Deserialize, Serialize};

use crate::ids::{BrandId, CategoryId, SubCategoryId};
use crate::quantity::Quantity;
use crate::variation::VariationCollection;

/// Product fields captured by the create/edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Declared total stock.
    pub quantity: Quantity,
    pub category: CategoryId,
    pub sub_category: SubCategoryId,
    /// Blank means no brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Whether stock is split into variations.
    #[serde(default)]
    pub variations_enabled: bool,
}

impl ProductDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: u32,
        category: CategoryId,
        sub_category: SubCategoryId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            quantity: Quantity::new(quantity),
            category,
            sub_category,
            brand: None,
            color: None,
            variations_enabled: false,
        }
    }

    pub fn with_variations(mut self, enabled: bool) -> Self {
        self.variations_enabled = enabled;
        self
    }

    /// Assemble the record sent to the product API.
    ///
    /// Variations are only attached when enabled.
    pub fn into_payload(self, variations: &VariationCollection) -> ProductPayload {
        let variations = if self.variations_enabled {
            variations.clone()
        } else {
            VariationCollection::new()
        };

        ProductPayload {
            title: self.title,
            description: self.description,
            price: self.price,
            quantity: self.quantity.get(),
            category: self.category,
            sub_category: self.sub_category,
            brand: self.brand.filter(|b| !b.as_str().is_empty()),
            color: self.color.filter(|c| !c.is_empty()),
            variations,
        }
    }
}

/// Product record as accepted by the persistence API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    pub category: CategoryId,
    pub sub_category: SubCategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub variations: VariationCollection,
}
