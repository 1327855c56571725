//! Product variation composition and validation for TurboCommerce.
//!
//! This crate holds the logic behind the admin product form's variation
//! editor:
//!
//! - **Catalog**: variant axes (color, size, ...) and the adapter that loads them
//! - **Variation**: entries, combination matching, merge-on-add
//! - **Quantity**: aggregate stock, remaining capacity, final reconciliation
//! - **Editor**: index-based drafts for editing an entry in place
//! - **Validate**: collect every rule violation before submission
//! - **Session**: the form-level state machine tying it together
//!
//! All operations are synchronous and return new collections rather than
//! mutating shared state.
//!
//! # Example
//!
//! ```rust
//! use turbo_variations::prelude::*;
//!
//! let catalog = VariantCatalog::new(vec![
//!     VariantAxis::new("color", ["red", "blue"]),
//!     VariantAxis::new("size", ["S", "M"]),
//! ]);
//!
//! let red_s = VariationEntry::new(3).with("color", "red").with("size", "S");
//! let collection = merge(&VariationCollection::new(), red_s.clone())?;
//! let collection = merge(&collection, VariationEntry { qty: 2, ..red_s })?;
//!
//! assert_eq!(collection.len(), 1);
//! assert_eq!(aggregate(&collection), 5);
//! assert!(reconcile_final(Quantity::new(5), &collection, true).is_ok());
//!
//! let draft = begin_edit(collection.get(0).unwrap(), &catalog, 0)?;
//! assert_eq!(draft.selections["size"], 0);
//! # Ok::<(), VariationError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod editor;
pub mod error;
pub mod form;
pub mod ids;
pub mod product;
pub mod quantity;
pub mod session;
pub mod validate;
pub mod variation;

pub use error::{
    FieldError, FieldErrors, MismatchError, SubmitError, ValidationError, ValidationErrors,
    VariationError,
};
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{
        CatalogError, ConfigError, FieldError, FieldErrors, MismatchError, SubmitError,
        ValidationError, ValidationErrors, VariationError,
    };
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        CatalogAdapter, CatalogState, JsonCatalogAdapter, StaticCatalogAdapter, VariantAxis,
        VariantCatalog, VariantInstance,
    };

    // Variations
    pub use crate::editor::{begin_edit, commit_edit, delete_at, EditDraft};
    pub use crate::quantity::{
        aggregate, capacity_message, ensure_capacity, reconcile_final, remaining, Quantity,
    };
    pub use crate::variation::{
        find_collisions, matches, merge, Selection, VariationCollection, VariationEntry,
    };

    // Submission
    pub use crate::config::{ProductRules, VariationConfig};
    pub use crate::form::{parse_qty, parse_selection, parse_stored_variations};
    pub use crate::product::{ProductDraft, ProductPayload};
    pub use crate::session::{SessionState, VariationSession};
    pub use crate::validate::{validate, validate_product, validate_submission};
}
