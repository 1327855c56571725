//! Parsing raw form input into typed variation records.
//!
//! Widgets deliver strings or numbers. Everything is checked here and reported
//! per field, so nothing malformed reaches the merge or reconcile steps.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::catalog::{VariantAxis, VariantInstance};
use crate::error::{FieldError, FieldErrors};
use crate::quantity::Quantity;
use crate::variation::{Selection, VariationCollection, VariationEntry};

/// Form key carrying the quantity.
pub const QTY_FIELD: &str = "qty";

/// Parse a quantity field.
pub fn parse_qty(value: &Value) -> Result<Quantity, FieldError> {
    Quantity::from_value(QTY_FIELD, value)
}

/// Parse the add-variation form: one instance index per active axis plus `qty`.
///
/// Keys that are not active axes are ignored.
pub fn parse_selection(
    raw: &Map<String, Value>,
    axes: &[VariantAxis],
) -> Result<Selection, FieldErrors> {
    let mut errors = Vec::new();
    let mut indices = BTreeMap::new();

    for axis in axes {
        match raw.get(&axis.name).map(|v| parse_index(&axis.name, v, axis.instances.len())) {
            Some(Ok(index)) => {
                indices.insert(axis.name.clone(), index);
            }
            Some(Err(e)) => errors.push(e),
            None => errors.push(FieldError::new(&axis.name, "is required")),
        }
    }

    let qty = match parse_qty(raw.get(QTY_FIELD).unwrap_or(&Value::Null)) {
        Ok(qty) => qty.get(),
        Err(e) => {
            errors.push(e);
            0
        }
    };

    if axes.is_empty() {
        errors.push(FieldError::new("variants", "select at least one variant"));
    }

    if errors.is_empty() {
        Ok(Selection { indices, qty })
    } else {
        Err(FieldErrors(errors))
    }
}

fn parse_index(field: &str, value: &Value, len: usize) -> Result<usize, FieldError> {
    let index = Quantity::from_value(field, value)?.get() as usize;
    if index < len {
        Ok(index)
    } else {
        Err(FieldError::new(
            field,
            format!("selection {index} is not one of the {len} options"),
        ))
    }
}

/// Parse variations stored on an existing product.
///
/// Expects `[{ "<axis>": { "name": .. }, "qty": n }, ..]`. Keys starting with
/// `_` are record metadata and skipped.
pub fn parse_stored_variations(value: &Value) -> Result<VariationCollection, FieldErrors> {
    let Some(items) = value.as_array() else {
        return Err(FieldErrors(vec![FieldError::new(
            "variations",
            "must be a list",
        )]));
    };

    let mut errors = Vec::new();
    let mut entries = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            errors.push(FieldError::new(format!("variations[{i}]"), "must be an object"));
            continue;
        };

        let mut entry = VariationEntry::default();
        match Quantity::from_value(
            &format!("variations[{i}].qty"),
            object.get(QTY_FIELD).unwrap_or(&Value::Null),
        ) {
            Ok(qty) => entry.qty = qty.get(),
            Err(e) => errors.push(e),
        }

        for (key, raw) in object {
            if key == QTY_FIELD || key.starts_with('_') {
                continue;
            }
            match serde_json::from_value::<VariantInstance>(raw.clone()) {
                Ok(instance) => {
                    entry.axes.insert(key.clone(), instance);
                }
                Err(e) => errors.push(FieldError::new(
                    format!("variations[{i}].{key}"),
                    e.to_string(),
                )),
            }
        }

        entries.push(entry);
    }

    if errors.is_empty() {
        Ok(VariationCollection::from(entries))
    } else {
        Err(FieldErrors(errors))
    }
}
