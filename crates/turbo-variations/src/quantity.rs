//! Quantity reconciliation between variations and the declared product total.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FieldError, MismatchError, VariationError};
use crate::variation::VariationCollection;

/// A whole, non-negative quantity parsed from form input.
///
/// Form widgets hand over either a string or a number; both go through
/// [`Quantity::from_value`] and nothing silently defaults to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Parse a raw form value for `field`.
    pub fn from_value(field: &str, value: &Value) -> Result<Self, FieldError> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Self)
                .ok_or_else(|| FieldError::new(field, format!("must be a whole number, got {n}"))),
            Value::String(s) => s
                .parse()
                .map_err(|e: ParseQuantityError| FieldError::new(field, e.to_string())),
            Value::Null => Err(FieldError::new(field, "is required")),
            other => Err(FieldError::new(
                field,
                format!("must be a whole number, got {other}"),
            )),
        }
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text that is not a whole, non-negative quantity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("must be a whole number, got {0:?}")]
pub struct ParseQuantityError(String);

impl FromStr for Quantity {
    type Err = ParseQuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ParseQuantityError(s.to_string()))
    }
}

/// Sum of every entry's quantity.
pub fn aggregate(collection: &VariationCollection) -> u64 {
    collection.iter().map(|e| u64::from(e.qty)).sum()
}

/// Quantity still unallocated; negative when over-allocated.
pub fn remaining(total: Quantity, collection: &VariationCollection) -> i64 {
    i64::from(total.get()) - aggregate(collection) as i64
}

/// Check the aggregate against the declared total at submission time.
///
/// Skipped entirely when variations are disabled.
pub fn reconcile_final(
    total: Quantity,
    collection: &VariationCollection,
    variations_enabled: bool,
) -> Result<(), MismatchError> {
    if !variations_enabled {
        return Ok(());
    }

    let actual = aggregate(collection);
    let expected = u64::from(total.get());
    if actual == expected {
        Ok(())
    } else {
        Err(MismatchError { expected, actual })
    }
}

/// Reject an add that would allocate more than the declared total.
pub fn ensure_capacity(
    total: Quantity,
    collection: &VariationCollection,
    incoming: u32,
) -> Result<(), VariationError> {
    let left = remaining(total, collection);
    if i64::from(incoming) > left {
        tracing::debug!(requested = incoming, remaining = left, "variation add over capacity");
        return Err(VariationError::CapacityExceeded {
            requested: u64::from(incoming),
            remaining: left,
        });
    }
    Ok(())
}

/// Hint shown next to the add form.
pub fn capacity_message(remaining: i64) -> String {
    let count = if remaining > 0 {
        remaining.to_string()
    } else {
        "no".to_string()
    };
    let noun = if remaining > 1 { "variations" } else { "variation" };
    format!("You can add {count} more {noun}.")
}
