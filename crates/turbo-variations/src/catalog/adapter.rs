//! Catalog adapter contract and load state.

use crate::catalog::{VariantAxis, VariantCatalog};
use crate::error::{CatalogError, VariationError};

/// Source of the variant axes offered to a product form.
///
/// Implementations wrap the remote variant API; the result shape is an
/// order-preserving list of `{ name, instances: [{ name }] }`.
pub trait CatalogAdapter {
    /// Fetch the axes for a form session.
    fn load(&self) -> Result<VariantCatalog, CatalogError>;
}

/// Adapter over an already-fetched JSON response body.
#[derive(Debug, Clone)]
pub struct JsonCatalogAdapter {
    body: String,
}

impl JsonCatalogAdapter {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl CatalogAdapter for JsonCatalogAdapter {
    fn load(&self) -> Result<VariantCatalog, CatalogError> {
        let axes: Vec<VariantAxis> = serde_json::from_str(&self.body)?;
        Ok(VariantCatalog::new(axes))
    }
}

/// Adapter over axes held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogAdapter {
    axes: Vec<VariantAxis>,
}

impl StaticCatalogAdapter {
    pub fn new(axes: Vec<VariantAxis>) -> Self {
        Self { axes }
    }
}

impl CatalogAdapter for StaticCatalogAdapter {
    fn load(&self) -> Result<VariantCatalog, CatalogError> {
        Ok(VariantCatalog::new(self.axes.clone()))
    }
}

/// Load state of the catalog for one form session.
///
/// Variation operations must not run before the catalog is loaded; an empty
/// catalog is never assumed in its place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    /// Load not finished.
    #[default]
    Pending,
    /// Catalog available.
    Loaded(VariantCatalog),
    /// Load failed; the message is kept for display.
    Failed(String),
}

impl CatalogState {
    /// Run an adapter and record the outcome.
    pub fn load_from(adapter: &impl CatalogAdapter) -> Self {
        match adapter.load() {
            Ok(catalog) => {
                tracing::debug!(axes = catalog.len(), "variant catalog loaded");
                CatalogState::Loaded(catalog)
            }
            Err(e) => {
                tracing::warn!(error = %e, "variant catalog load failed");
                CatalogState::Failed(e.to_string())
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, CatalogState::Loaded(_))
    }

    /// The loaded catalog, or [`VariationError::CatalogNotLoaded`].
    pub fn require(&self) -> Result<&VariantCatalog, VariationError> {
        match self {
            CatalogState::Loaded(catalog) => Ok(catalog),
            _ => Err(VariationError::CatalogNotLoaded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_adapter() {
        let adapter = JsonCatalogAdapter::new(
            r#"[{"name":"color","instances":[{"name":"red"},{"name":"blue"}]},
                {"name":"size","instances":[{"name":"S"}]}]"#,
        );
        let state = CatalogState::load_from(&adapter);
        let catalog = state.require().unwrap();
        assert_eq!(catalog.axes()[0].name, "color");
        assert_eq!(catalog.position_of("color", "blue").unwrap(), 1);
    }

    #[test]
    fn test_json_adapter_rejects_bad_payload() {
        let state = CatalogState::load_from(&JsonCatalogAdapter::new("{\"oops\":1}"));
        assert!(matches!(state, CatalogState::Failed(_)));
        assert_eq!(state.require().unwrap_err(), VariationError::CatalogNotLoaded);
    }

    #[test]
    fn test_pending_is_not_loaded() {
        let state = CatalogState::default();
        assert!(!state.is_loaded());
        assert_eq!(state.require().unwrap_err(), VariationError::CatalogNotLoaded);
    }

    #[test]
    fn test_static_adapter() {
        let adapter = StaticCatalogAdapter::new(vec![VariantAxis::new("size", ["S", "M"])]);
        let state = CatalogState::load_from(&adapter);
        assert!(state.is_loaded());
    }
}
