use proptest::prelude::*;
use turbo_variations::prelude::*;

const COLORS: [&str; 3] = ["red", "blue", "green"];
const SIZES: [&str; 3] = ["S", "M", "L"];

fn catalog() -> VariantCatalog {
    VariantCatalog::new(vec![
        VariantAxis::new("color", COLORS),
        VariantAxis::new("size", SIZES),
    ])
}

fn arb_entry() -> impl Strategy<Value = VariationEntry> {
    (
        prop::option::of(0..COLORS.len()),
        prop::option::of(0..SIZES.len()),
        0u32..1000,
    )
        .prop_filter("at least one axis", |(c, s, _)| c.is_some() || s.is_some())
        .prop_map(|(color, size, qty)| {
            let mut entry = VariationEntry::new(qty);
            if let Some(c) = color {
                entry = entry.with("color", COLORS[c]);
            }
            if let Some(s) = size {
                entry = entry.with("size", SIZES[s]);
            }
            entry
        })
}

fn arb_collection() -> impl Strategy<Value = VariationCollection> {
    prop::collection::vec(arb_entry(), 0..8).prop_map(|entries| {
        entries
            .into_iter()
            .try_fold(VariationCollection::new(), |acc, e| merge(&acc, e))
            .unwrap()
    })
}

proptest! {
    #[test]
    fn matcher_is_symmetric(a in arb_entry(), b in arb_entry()) {
        prop_assert_eq!(matches(&a, &b), matches(&b, &a));
    }

    #[test]
    fn merge_preserves_total(collection in arb_collection(), entry in arb_entry()) {
        let merged = merge(&collection, entry.clone()).unwrap();
        prop_assert_eq!(aggregate(&merged), aggregate(&collection) + u64::from(entry.qty));
    }

    #[test]
    fn merging_twice_accumulates(collection in arb_collection(), entry in arb_entry()) {
        let once = merge(&collection, entry.clone()).unwrap();
        let twice = merge(&once, entry.clone()).unwrap();

        prop_assert_eq!(once.len(), twice.len());
        prop_assert!(find_collisions(&twice).is_empty());

        let index = twice.iter().position(|e| matches(e, &entry)).unwrap();
        prop_assert_eq!(
            twice.get(index).unwrap().qty,
            once.get(index).unwrap().qty + entry.qty
        );
    }

    #[test]
    fn edit_round_trip(collection in arb_collection(), entry in arb_entry()) {
        let catalog = catalog();
        let collection = merge(&collection, entry.clone()).unwrap();
        let location = collection.iter().position(|e| matches(e, &entry)).unwrap();
        let stored = collection.get(location).unwrap().clone();

        let draft = begin_edit(&stored, &catalog, location).unwrap();
        let rebuilt = commit_edit(&collection, &draft, &catalog).unwrap();
        prop_assert_eq!(rebuilt, collection);
    }

    #[test]
    fn merge_never_clamps(base in (u32::MAX - 1000)..=u32::MAX, added in 0u32..2000) {
        let red = VariationEntry::new(base).with("color", "red");
        let collection = merge(&VariationCollection::new(), red).unwrap();
        let result = merge(&collection, VariationEntry::new(added).with("color", "red"));

        match base.checked_add(added) {
            Some(sum) => prop_assert_eq!(result.unwrap().get(0).unwrap().qty, sum),
            None => prop_assert!(result.is_err()),
        }
    }

    #[test]
    fn reconciliation_boundary(collection in arb_collection()) {
        let total = aggregate(&collection) as u32;
        prop_assert!(reconcile_final(Quantity::new(total), &collection, true).is_ok());
        prop_assert!(reconcile_final(Quantity::new(total + 1), &collection, true).is_err());
        if total > 0 {
            prop_assert!(reconcile_final(Quantity::new(total - 1), &collection, true).is_err());
        }
    }
}
