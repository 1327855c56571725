//! Variant catalog module.
//!
//! Contains the variant axes offered to a product form and the adapter
//! contract used to load them.

mod adapter;
mod axis;

pub use adapter::{CatalogAdapter, CatalogState, JsonCatalogAdapter, StaticCatalogAdapter};
pub use axis::{VariantAxis, VariantCatalog, VariantInstance};
