//! Combination matching.

use crate::variation::{VariationCollection, VariationEntry};

/// Whether two entries select the same instance on the same set of axes.
///
/// Quantity is ignored and instances compare by name.
pub fn matches(a: &VariationEntry, b: &VariationEntry) -> bool {
    a.axes.len() == b.axes.len()
        && a.axes.iter().all(|(axis, instance)| {
            b.axes
                .get(axis)
                .is_some_and(|other| other.name == instance.name)
        })
}

/// Position of the first entry matching `entry`.
pub fn find_match(collection: &VariationCollection, entry: &VariationEntry) -> Option<usize> {
    collection.iter().position(|existing| matches(existing, entry))
}

/// Every pair of positions `(first, second)` whose entries match, `first < second`.
pub fn find_collisions(collection: &VariationCollection) -> Vec<(usize, usize)> {
    let entries = collection.entries();
    let mut collisions = Vec::new();
    for (i, a) in entries.iter().enumerate() {
        for (j, b) in entries.iter().enumerate().skip(i + 1) {
            if matches(a, b) {
                collisions.push((i, j));
            }
        }
    }
    collisions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_ignores_qty() {
        let a = VariationEntry::new(3).with("color", "red").with("size", "S");
        let b = VariationEntry::new(9).with("size", "S").with("color", "red");
        assert!(matches(&a, &b));
    }

    #[test]
    fn test_matches_different_instance() {
        let a = VariationEntry::new(3).with("color", "red").with("size", "S");
        let b = VariationEntry::new(3).with("color", "blue").with("size", "S");
        assert!(!matches(&a, &b));
    }

    #[test]
    fn test_matches_different_axis_set() {
        let a = VariationEntry::new(1).with("color", "red");
        let b = VariationEntry::new(1).with("color", "red").with("size", "S");
        assert!(!matches(&a, &b));
        assert!(!matches(&b, &a));
    }

    #[test]
    fn test_find_collisions() {
        let collection: VariationCollection = vec![
            VariationEntry::new(1).with("color", "red"),
            VariationEntry::new(1).with("color", "blue"),
            VariationEntry::new(2).with("color", "red"),
        ]
        .into_iter()
        .collect();
        assert_eq!(find_collisions(&collection), vec![(0, 2)]);
        assert_eq!(
            find_match(&collection, &VariationEntry::new(0).with("color", "blue")),
            Some(1)
        );
    }
}
