//! Editing existing variation entries.
//!
//! An edit works on an [`EditDraft`]: the entry's instances translated to
//! positions within the catalog axes, plus the slot it came from. Saving the
//! draft overwrites that slot; it never folds into another entry, even when
//! the edited combination now equals one. Such collisions are reported by
//! [`crate::validate::validate`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::VariantCatalog;
use crate::error::VariationError;
use crate::variation::{VariationCollection, VariationEntry};

/// Index-based representation of an entry being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDraft {
    /// Instance position per axis name.
    pub selections: BTreeMap<String, usize>,
    /// Edited quantity.
    pub qty: u32,
    /// Collection slot the entry came from.
    pub location: usize,
}

impl EditDraft {
    /// Change the instance selected for `axis`.
    pub fn select(&mut self, axis: impl Into<String>, index: usize) {
        self.selections.insert(axis.into(), index);
    }

    pub fn set_qty(&mut self, qty: u32) {
        self.qty = qty;
    }
}

/// Build a draft for the entry stored at `location`.
///
/// Fails with [`VariationError::InstanceNotFound`] when the catalog no longer
/// offers one of the entry's instances, including when the whole axis is
/// gone; the user has to re-select it.
pub fn begin_edit(
    entry: &VariationEntry,
    catalog: &VariantCatalog,
    location: usize,
) -> Result<EditDraft, VariationError> {
    let mut selections = BTreeMap::new();
    for (axis, instance) in &entry.axes {
        let index = catalog
            .position_of(axis, &instance.name)
            .map_err(|e| match e {
                VariationError::AxisNotFound { axis } => VariationError::InstanceNotFound {
                    axis,
                    instance: instance.name.clone(),
                },
                other => other,
            })
            .inspect_err(|e| {
                tracing::warn!(location, error = %e, "cannot edit variation");
            })?;
        selections.insert(axis.clone(), index);
    }

    Ok(EditDraft {
        selections,
        qty: entry.qty,
        location,
    })
}

/// Resolve `draft` back into an entry and overwrite its slot.
pub fn commit_edit(
    collection: &VariationCollection,
    draft: &EditDraft,
    catalog: &VariantCatalog,
) -> Result<VariationCollection, VariationError> {
    if draft.selections.is_empty() {
        return Err(VariationError::EmptyAxisSet);
    }

    let mut axes = BTreeMap::new();
    for (axis, &index) in &draft.selections {
        axes.insert(axis.clone(), catalog.instance_at(axis, index)?.clone());
    }
    let entry = VariationEntry {
        axes,
        qty: draft.qty,
    };

    tracing::debug!(
        location = draft.location,
        qty = entry.qty,
        variation = %entry.build_name(),
        "committed variation edit"
    );
    collection.replaced(draft.location, entry)
}

/// Remove the entry at `index`.
pub fn delete_at(
    collection: &VariationCollection,
    index: usize,
) -> Result<VariationCollection, VariationError> {
    let next = collection.removed(index)?;
    tracing::debug!(index, remaining = next.len(), "deleted variation");
    Ok(next)
}
