//! Variation entry and selection types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{VariantCatalog, VariantInstance};
use crate::error::VariationError;

/// One purchasable combination of axis instances with its quantity.
///
/// Serializes to the persistence shape `{ "<axis>": { "name": .. }, "qty": n }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariationEntry {
    /// Selected instance per axis name.
    #[serde(flatten)]
    pub axes: BTreeMap<String, VariantInstance>,
    /// Stock for this combination.
    pub qty: u32,
}

impl VariationEntry {
    /// Create an entry with no axes selected yet.
    pub fn new(qty: u32) -> Self {
        Self {
            axes: BTreeMap::new(),
            qty,
        }
    }

    /// Select `instance` for `axis`.
    pub fn with(mut self, axis: impl Into<String>, instance: impl Into<String>) -> Self {
        self.axes.insert(axis.into(), VariantInstance::new(instance));
        self
    }

    /// Resolve a per-axis index selection against the catalog.
    ///
    /// Selection keys the catalog does not know are rejected.
    pub fn from_selection(
        catalog: &VariantCatalog,
        selection: &Selection,
    ) -> Result<Self, VariationError> {
        if selection.indices.is_empty() {
            return Err(VariationError::EmptyAxisSet);
        }

        let mut axes = BTreeMap::new();
        for (axis, &index) in &selection.indices {
            let instance = catalog.instance_at(axis, index)?;
            axes.insert(axis.clone(), instance.clone());
        }

        Ok(Self {
            axes,
            qty: selection.qty,
        })
    }

    /// Selected instance for `axis`.
    pub fn instance(&self, axis: &str) -> Option<&VariantInstance> {
        self.axes.get(axis)
    }

    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(String::as_str)
    }

    pub fn has_axes(&self) -> bool {
        !self.axes.is_empty()
    }

    /// Display label, e.g. "red / S".
    pub fn build_name(&self) -> String {
        if self.axes.is_empty() {
            "Default".to_string()
        } else {
            self.axes
                .values()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>()
                .join(" / ")
        }
    }
}

/// Index-based choice of one instance per axis, as captured by the add form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// Instance position per axis name.
    pub indices: BTreeMap<String, usize>,
    /// Requested quantity.
    pub qty: u32,
}

impl Selection {
    pub fn new(qty: u32) -> Self {
        Self {
            indices: BTreeMap::new(),
            qty,
        }
    }

    /// Pick the instance at `index` for `axis`.
    pub fn pick(mut self, axis: impl Into<String>, index: usize) -> Self {
        self.indices.insert(axis.into(), index);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VariantAxis;

    fn catalog() -> VariantCatalog {
        VariantCatalog::new(vec![
            VariantAxis::new("color", ["red", "blue"]),
            VariantAxis::new("size", ["S", "M"]),
        ])
    }

    #[test]
    fn test_from_selection() {
        let selection = Selection::new(3).pick("color", 1).pick("size", 0);
        let entry = VariationEntry::from_selection(&catalog(), &selection).unwrap();
        assert_eq!(entry, VariationEntry::new(3).with("color", "blue").with("size", "S"));
    }

    #[test]
    fn test_from_selection_rejects_empty() {
        let err = VariationEntry::from_selection(&catalog(), &Selection::new(1)).unwrap_err();
        assert_eq!(err, VariationError::EmptyAxisSet);
    }

    #[test]
    fn test_from_selection_out_of_range() {
        let selection = Selection::new(1).pick("size", 5);
        let err = VariationEntry::from_selection(&catalog(), &selection).unwrap_err();
        assert!(matches!(err, VariationError::InstanceIndexOutOfRange { index: 5, .. }));
    }

    #[test]
    fn test_serialized_shape() {
        let entry = VariationEntry::new(3).with("color", "red").with("size", "S");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "color": { "name": "red" }, "size": { "name": "S" }, "qty": 3 })
        );
    }

    #[test]
    fn test_deserialize_stored_shape() {
        let entry: VariationEntry = serde_json::from_str(
            r#"{ "color": { "name": "red", "_id": "abc" }, "qty": 2 }"#,
        )
        .unwrap();
        assert_eq!(entry.qty, 2);
        assert_eq!(entry.instance("color").unwrap().id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_build_name() {
        let entry = VariationEntry::new(1).with("color", "red").with("size", "S");
        assert_eq!(entry.build_name(), "red / S");
        assert_eq!(VariationEntry::new(1).build_name(), "Default");
    }
}
