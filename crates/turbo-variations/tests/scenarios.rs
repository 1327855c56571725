//! End-to-end variation scenarios for the product form.

use turbo_variations::prelude::*;

fn catalog() -> VariantCatalog {
    VariantCatalog::new(vec![
        VariantAxis::new("color", ["red", "blue"]),
        VariantAxis::new("size", ["S", "M"]),
    ])
}

fn entry(color: &str, size: &str, qty: u32) -> VariationEntry {
    VariationEntry::new(qty).with("color", color).with("size", size)
}

fn product(quantity: u32) -> ProductDraft {
    ProductDraft::new(
        "Field jacket",
        "Waxed cotton field jacket",
        149.0,
        quantity,
        CategoryId::new("60d5ec49f1b2c72b9c8e4a1f"),
        SubCategoryId::new("60d5ec49f1b2c72b9c8e4a20"),
    )
    .with_variations(true)
}

#[test]
fn same_combination_twice_merges_quantity() {
    let collection = merge(&VariationCollection::new(), entry("red", "S", 3)).unwrap();
    let collection = merge(&collection, entry("red", "S", 2)).unwrap();

    assert_eq!(collection.len(), 1);
    assert_eq!(collection.get(0), Some(&entry("red", "S", 5)));
}

#[test]
fn distinct_combinations_stay_separate() {
    let collection = merge(&VariationCollection::new(), entry("red", "S", 3)).unwrap();
    let collection = merge(&collection, entry("blue", "S", 2)).unwrap();

    assert_eq!(collection.len(), 2);
    assert_eq!(aggregate(&collection), 5);
}

#[test]
fn reconcile_against_declared_total() {
    let short: VariationCollection = vec![entry("red", "S", 4), entry("blue", "M", 3)].into();
    assert_eq!(
        reconcile_final(Quantity::new(10), &short, true),
        Err(MismatchError {
            expected: 10,
            actual: 7
        })
    );

    let exact: VariationCollection = vec![entry("red", "S", 4), entry("blue", "M", 6)].into();
    assert!(reconcile_final(Quantity::new(10), &exact, true).is_ok());
}

#[test]
fn edit_into_existing_combination_is_flagged_not_merged() {
    let catalog = catalog();
    let collection: VariationCollection =
        vec![entry("red", "S", 3), entry("blue", "M", 1)].into();

    let mut draft = begin_edit(collection.get(0).unwrap(), &catalog, 0).unwrap();
    draft.select("color", 1);
    draft.select("size", 1);
    let edited = commit_edit(&collection, &draft, &catalog).unwrap();

    assert_eq!(edited.len(), 2);
    assert_eq!(edited.get(0), Some(&entry("blue", "M", 3)));
    assert_eq!(edited.get(1), Some(&entry("blue", "M", 1)));

    let errors = validate(&edited, &product(4), &catalog, &VariationConfig::default()).unwrap_err();
    assert_eq!(
        errors.0,
        vec![ValidationError::DuplicateCombination {
            first: 0,
            second: 1
        }]
    );
}

#[test]
fn catalog_change_blocks_edit() {
    let collection: VariationCollection = vec![entry("red", "S", 3)].into();
    let shrunk = VariantCatalog::new(vec![
        VariantAxis::new("color", ["blue"]),
        VariantAxis::new("size", ["S", "M"]),
    ]);

    let err = begin_edit(collection.get(0).unwrap(), &shrunk, 0).unwrap_err();
    assert_eq!(
        err,
        VariationError::InstanceNotFound {
            axis: "color".into(),
            instance: "red".into()
        }
    );
}

#[test]
fn dropped_axis_blocks_edit() {
    let collection: VariationCollection = vec![entry("red", "S", 3)].into();
    let sizes_only = VariantCatalog::new(vec![VariantAxis::new("size", ["S"])]);

    let err = begin_edit(collection.get(0).unwrap(), &sizes_only, 0).unwrap_err();
    assert_eq!(
        err,
        VariationError::InstanceNotFound {
            axis: "color".into(),
            instance: "red".into()
        }
    );
    assert!(err.to_string().starts_with("Please re-select this variation"));
}

#[test]
fn full_session_from_json_catalog_to_payload() {
    let mut session = VariationSession::default();
    session.load_catalog(&JsonCatalogAdapter::new(
        r#"[{"name":"color","instances":[{"name":"red"},{"name":"blue"}]},
            {"name":"size","instances":[{"name":"S"},{"name":"M"}]}]"#,
    ));
    session.select_axis("color").unwrap();
    session.select_axis("size").unwrap();
    session.set_variations_enabled(true).unwrap();

    let total = Quantity::new(6);
    for raw in [
        serde_json::json!({ "color": 0, "size": 0, "qty": "3" }),
        serde_json::json!({ "color": "0", "size": "0", "qty": 1 }),
        serde_json::json!({ "color": 1, "size": 1, "qty": 2 }),
    ] {
        let selection = session.parse_add_form(raw.as_object().unwrap()).unwrap();
        session.add(&selection, total).unwrap();
    }
    assert_eq!(session.collection().len(), 2);
    assert_eq!(session.remaining(total), 0);
    assert_eq!(session.capacity_message(total), "You can add no more variation.");

    let payload = session.submit(product(6)).unwrap();
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(
        json["variations"],
        serde_json::json!([
            { "color": { "name": "red" }, "size": { "name": "S" }, "qty": 4 },
            { "color": { "name": "blue" }, "size": { "name": "M" }, "qty": 2 }
        ])
    );
    assert_eq!(session.state(), SessionState::Submitted);
}

#[test]
fn stored_variations_reload_for_editing() {
    let stored = serde_json::json!([
        { "color": { "name": "blue" }, "size": { "name": "M" }, "qty": 2 },
        { "color": { "name": "red" }, "size": { "name": "S" }, "qty": "3" }
    ]);
    let collection = parse_stored_variations(&stored).unwrap();
    let mut session =
        VariationSession::from_existing(catalog(), collection, VariationConfig::default());

    let draft = session.begin_edit(1).unwrap();
    assert_eq!(draft.selections["color"], 0);
    assert_eq!(draft.qty, 3);

    session.draft_mut().unwrap().set_qty(1);
    session.commit_edit().unwrap();
    let err = session.submit(product(5)).unwrap_err();
    assert!(matches!(err, SubmitError::Invalid(ref e) if e.len() == 1));
    assert_eq!(session.state(), SessionState::HasEntries);
}
