//! Ordered, copy-on-write variation collection.

use serde::{Deserialize, Serialize};

use crate::error::VariationError;
use crate::variation::VariationEntry;

/// Ordered sequence of variation entries for one product.
///
/// Order is insertion/edit order. Every change produces a new collection;
/// existing snapshots are never modified.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationCollection {
    entries: Vec<VariationEntry>,
}

impl VariationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[VariationEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VariationEntry> {
        self.entries.get(index)
    }

    /// Entry at `index`, or [`VariationError::IndexOutOfRange`].
    pub fn require(&self, index: usize) -> Result<&VariationEntry, VariationError> {
        self.entries.get(index).ok_or_else(|| self.out_of_range(index))
    }

    /// New collection with `entry` at the end.
    pub(crate) fn appended(&self, entry: VariationEntry) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend_from_slice(&self.entries);
        entries.push(entry);
        Self { entries }
    }

    /// New collection with the slot at `index` overwritten.
    pub(crate) fn replaced(
        &self,
        index: usize,
        entry: VariationEntry,
    ) -> Result<Self, VariationError> {
        let mut entries = self.entries.clone();
        let slot = entries.get_mut(index).ok_or_else(|| self.out_of_range(index))?;
        *slot = entry;
        Ok(Self { entries })
    }

    /// New collection without the slot at `index`.
    pub(crate) fn removed(&self, index: usize) -> Result<Self, VariationError> {
        if index >= self.entries.len() {
            return Err(self.out_of_range(index));
        }
        let mut entries = self.entries.clone();
        entries.remove(index);
        Ok(Self { entries })
    }

    fn out_of_range(&self, index: usize) -> VariationError {
        let len = self.entries.len();
        tracing::error!(index, len, "stale variation index");
        VariationError::IndexOutOfRange { index, len }
    }
}

impl From<Vec<VariationEntry>> for VariationCollection {
    fn from(entries: Vec<VariationEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<VariationEntry> for VariationCollection {
    fn from_iter<T: IntoIterator<Item = VariationEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a VariationCollection {
    type Item = &'a VariationEntry;
    type IntoIter = std::slice::Iter<'a, VariationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for VariationCollection {
    type Item = VariationEntry;
    type IntoIter = std::vec::IntoIter<VariationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
