//! Folding new entries into a collection.

use crate::error::VariationError;
use crate::variation::{find_match, VariationCollection, VariationEntry};

/// Fold `incoming` into `collection`, returning the next version.
///
/// The first entry with the same combination gets its quantity summed with
/// the incoming one; otherwise `incoming` is appended. Length and order are
/// otherwise unchanged. `incoming` is expected to carry at least one axis.
///
/// Fails with [`VariationError::QuantityOverflow`] when the summed quantity
/// does not fit; `collection` is left as it was.
pub fn merge(
    collection: &VariationCollection,
    incoming: VariationEntry,
) -> Result<VariationCollection, VariationError> {
    match find_match(collection, &incoming) {
        Some(index) => {
            let mut entries = collection.entries().to_vec();
            if let Some(existing) = entries.get_mut(index) {
                existing.qty = existing.qty.checked_add(incoming.qty).ok_or(
                    VariationError::QuantityOverflow {
                        index,
                        qty: existing.qty,
                        added: incoming.qty,
                    },
                )?;
                tracing::debug!(
                    index,
                    added = incoming.qty,
                    qty = existing.qty,
                    variation = %existing.build_name(),
                    "merged variation into existing entry"
                );
            }
            Ok(VariationCollection::from(entries))
        }
        None => {
            tracing::debug!(
                index = collection.len(),
                qty = incoming.qty,
                variation = %incoming.build_name(),
                "appended variation"
            );
            Ok(collection.appended(incoming))
        }
    }
}
