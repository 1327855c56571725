//! Variation error types.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Aggregate variation quantity does not equal the declared total.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[error("Total quantity and variations total quantity not matching: expected {expected}, got {actual}")]
pub struct MismatchError {
    /// Declared product quantity.
    pub expected: u64,
    /// Sum of every variation quantity.
    pub actual: u64,
}

/// Errors raised by variation operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariationError {
    /// The variant catalog has not finished loading.
    #[error("Variant catalog not loaded")]
    CatalogNotLoaded,

    /// An entry references an axis the catalog does not offer.
    #[error("Variant axis not found: {axis}")]
    AxisNotFound { axis: String },

    /// An entry references an instance that is no longer in its axis.
    #[error("Please re-select this variation: {axis} has no instance named {instance}")]
    InstanceNotFound { axis: String, instance: String },

    /// A selection index points past the end of an axis.
    #[error("Instance index {index} out of range for {axis} ({len} instances)")]
    InstanceIndexOutOfRange {
        axis: String,
        index: usize,
        len: usize,
    },

    /// Edit or delete referenced a stale collection slot.
    #[error("Variation index {index} out of range (collection has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Aggregate quantity mismatch.
    #[error(transparent)]
    Mismatch(#[from] MismatchError),

    /// Adding the entry would allocate more than the declared total.
    #[error("Cannot add {requested} more; only {remaining} left")]
    CapacityExceeded { requested: u64, remaining: i64 },

    /// Summing into an existing entry would overflow its quantity.
    #[error("Variation {index} quantity {qty} cannot take {added} more")]
    QuantityOverflow { index: usize, qty: u32, added: u32 },

    /// An entry selects no axis at all.
    #[error("Variation must select at least one variant")]
    EmptyAxisSet,

    /// Operation not allowed in the current session state.
    #[error("Cannot {operation} while session is {state}")]
    InvalidState {
        state: &'static str,
        operation: &'static str,
    },
}

/// A single rule violation found while validating a submission.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// Entry selects no axis.
    #[error("Variation {index} has no variants selected")]
    EmptyAxisSet { index: usize },

    /// Two entries carry the same axis/instance combination.
    #[error("Variations {first} and {second} have the same combination")]
    DuplicateCombination { first: usize, second: usize },

    /// Aggregate quantity does not match the declared total.
    #[error(transparent)]
    QuantityMismatch(MismatchError),

    /// Entry references an axis missing from the catalog.
    #[error("Variation {index} references unknown variant {axis}")]
    UnknownAxis { index: usize, axis: String },

    /// Entry references an instance missing from its axis.
    #[error("Variation {index} references unknown {axis} {instance}")]
    UnknownInstance {
        index: usize,
        axis: String,
        instance: String,
    },

    /// Entry quantity above the configured ceiling.
    #[error("Variation {index} quantity {qty} exceeds maximum allowed ({limit})")]
    QuantityExceedsLimit { index: usize, qty: u32, limit: u32 },

    /// A product field failed its schema rule.
    #[error("{0}")]
    Field(FieldError),
}

/// Every violation found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<T: IntoIterator<Item = ValidationError>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw form input that could not be parsed into a typed value.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Form field name (axis name, `qty`, `quantity`, ...).
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Field-level errors collected while parsing one form.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
#[error("Invalid form input: {}", join_messages(&self.0))]
pub struct FieldErrors(pub Vec<FieldError>);

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl FieldErrors {
    /// Look up the error attached to a field.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

/// Why a session submit was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// One or more validation rules failed.
    #[error("Submission invalid: {0}")]
    Invalid(ValidationErrors),

    /// The session cannot submit in its current state.
    #[error(transparent)]
    Session(#[from] VariationError),
}

/// Errors loading the variant catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog payload was not valid JSON of the expected shape.
    #[error("Invalid catalog payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// The adapter could not reach its source.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Errors loading a [`crate::config::VariationConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse JSON config {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
