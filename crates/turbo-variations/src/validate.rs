//! Submission-time validation.
//!
//! Every rule runs on every call and all violations are returned together,
//! so the form can show each problem at once.

use crate::catalog::VariantCatalog;
use crate::config::{ProductRules, VariationConfig};
use crate::error::{FieldError, ValidationError, ValidationErrors};
use crate::product::ProductDraft;
use crate::quantity::reconcile_final;
use crate::variation::{find_collisions, VariationCollection};

/// Check a finalized variation collection against the product and catalog.
pub fn validate(
    collection: &VariationCollection,
    product: &ProductDraft,
    catalog: &VariantCatalog,
    config: &VariationConfig,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for (index, entry) in collection.iter().enumerate() {
        if !entry.has_axes() {
            errors.push(ValidationError::EmptyAxisSet { index });
        }

        if let Some(limit) = config.max_qty_per_entry {
            if entry.qty > limit {
                errors.push(ValidationError::QuantityExceedsLimit {
                    index,
                    qty: entry.qty,
                    limit,
                });
            }
        }

        for (axis, instance) in &entry.axes {
            match catalog.axis(axis) {
                None => errors.push(ValidationError::UnknownAxis {
                    index,
                    axis: axis.clone(),
                }),
                Some(found) if found.position(&instance.name).is_none() => {
                    errors.push(ValidationError::UnknownInstance {
                        index,
                        axis: axis.clone(),
                        instance: instance.name.clone(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    errors.extend(
        find_collisions(collection)
            .into_iter()
            .map(|(first, second)| ValidationError::DuplicateCombination { first, second }),
    );

    if let Err(mismatch) = reconcile_final(product.quantity, collection, product.variations_enabled)
    {
        errors.push(ValidationError::QuantityMismatch(mismatch));
    }

    errors.into_result()
}

/// Check the product fields submitted alongside the variations.
pub fn validate_product(
    product: &ProductDraft,
    rules: &ProductRules,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut field = |name: &str, message: String| {
        errors.push(ValidationError::Field(FieldError::new(name, message)));
    };

    let title_len = product.title.trim().chars().count();
    if title_len == 0 || title_len > rules.title_max_len {
        field(
            "title",
            format!("Title must be between 1 and {} characters", rules.title_max_len),
        );
    }

    let description_len = product.description.trim().chars().count();
    if description_len == 0 || description_len > rules.description_max_len {
        field(
            "description",
            format!(
                "Description must be between 1 and {} characters",
                rules.description_max_len
            ),
        );
    }

    if !(product.price.is_finite() && product.price >= rules.min_price as f64) {
        field(
            "price",
            format!("Price must be at least {}", rules.min_price),
        );
    }

    if product.quantity.get() < rules.min_quantity {
        field(
            "quantity",
            format!("Quantity must be at least {}", rules.min_quantity),
        );
    }

    if !product.category.is_valid() {
        field("category", "Category must be a valid id".to_string());
    }

    if !product.sub_category.is_valid() {
        field("subCategory", "Sub category must be a valid id".to_string());
    }

    if let Some(brand) = product.brand.as_ref().filter(|b| !b.as_str().is_empty()) {
        if !brand.is_valid() {
            field("brand", "Brand must be a valid id".to_string());
        }
    }

    errors.into_result()
}

/// Run product and variation validation together.
pub fn validate_submission(
    collection: &VariationCollection,
    product: &ProductDraft,
    catalog: &VariantCatalog,
    config: &VariationConfig,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Err(e) = validate_product(product, &config.product) {
        errors.extend(e);
    }
    if let Err(e) = validate(collection, product, catalog, config) {
        errors.extend(e);
    }
    errors.into_result()
}
