//! Variation editing session for one product form.
//!
//! The session owns the variation collection and routes every change through
//! the merge and edit operations. States:
//!
//! ```text
//! Empty --add--> HasEntries --add/edit/delete--> HasEntries --submit ok--> Submitted
//!                    ^                                 |
//!                    +---------- submit failed --------+
//! ```
//!
//! A failed submit keeps every entry and attaches the errors.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{CatalogAdapter, CatalogState, VariantAxis, VariantCatalog};
use crate::config::VariationConfig;
use crate::editor::{self, EditDraft};
use crate::error::{FieldError, FieldErrors, SubmitError, ValidationErrors, VariationError};
use crate::form;
use crate::product::{ProductDraft, ProductPayload};
use crate::quantity::{self, Quantity};
use crate::validate::validate_submission;
use crate::variation::{merge, Selection, VariationCollection, VariationEntry};

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No variations yet.
    Empty,
    /// At least one variation.
    HasEntries,
    /// Submitted; no further changes.
    Submitted,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Empty => "empty",
            SessionState::HasEntries => "has_entries",
            SessionState::Submitted => "submitted",
        }
    }
}

/// Editing state for the variations of one product form.
#[derive(Debug, Clone)]
pub struct VariationSession {
    catalog: CatalogState,
    config: VariationConfig,
    active_axes: Vec<String>,
    collection: VariationCollection,
    draft: Option<EditDraft>,
    enabled: bool,
    submitted: bool,
    errors: ValidationErrors,
}

impl VariationSession {
    /// Start a session for a new product; the catalog is still pending.
    pub fn new(config: VariationConfig) -> Self {
        Self {
            catalog: CatalogState::Pending,
            config,
            active_axes: Vec::new(),
            collection: VariationCollection::new(),
            draft: None,
            enabled: false,
            submitted: false,
            errors: ValidationErrors::new(),
        }
    }

    /// Start a session for an existing product.
    ///
    /// Variations are enabled when the product already has some, and every
    /// axis they use is marked active.
    pub fn from_existing(
        catalog: VariantCatalog,
        collection: VariationCollection,
        config: VariationConfig,
    ) -> Self {
        let mut active_axes: Vec<String> = Vec::new();
        for name in collection.iter().flat_map(VariationEntry::axis_names) {
            if !active_axes.iter().any(|a| a == name) {
                active_axes.push(name.to_string());
            }
        }

        Self {
            catalog: CatalogState::Loaded(catalog),
            enabled: !collection.is_empty(),
            active_axes,
            collection,
            ..Self::new(config)
        }
    }

    /// Load the catalog through `adapter`.
    pub fn load_catalog(&mut self, adapter: &impl CatalogAdapter) {
        self.catalog = CatalogState::load_from(adapter);
    }

    pub fn set_catalog(&mut self, catalog: VariantCatalog) {
        self.catalog = CatalogState::Loaded(catalog);
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn state(&self) -> SessionState {
        if self.submitted {
            SessionState::Submitted
        } else if self.collection.is_empty() {
            SessionState::Empty
        } else {
            SessionState::HasEntries
        }
    }

    pub fn collection(&self) -> &VariationCollection {
        &self.collection
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    /// Mutable access to the open draft, for field changes.
    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.draft.as_mut()
    }

    /// Errors from the last failed submit.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn variations_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle variation mode. Existing entries are kept either way.
    pub fn set_variations_enabled(&mut self, enabled: bool) -> Result<(), VariationError> {
        self.ensure_editable("toggle variations")?;
        self.enabled = enabled;
        Ok(())
    }

    /// Offer `axis` on the add form.
    pub fn select_axis(&mut self, axis: &str) -> Result<(), VariationError> {
        self.ensure_editable("select variant")?;
        self.catalog.require()?.require_axis(axis)?;
        if !self.active_axes.iter().any(|a| a == axis) {
            self.active_axes.push(axis.to_string());
        }
        Ok(())
    }

    /// Stop offering `axis` on the add form.
    pub fn deselect_axis(&mut self, axis: &str) -> Result<(), VariationError> {
        self.ensure_editable("deselect variant")?;
        self.active_axes.retain(|a| a != axis);
        Ok(())
    }

    /// Axes currently offered on the add form, in selection order.
    pub fn active_axes(&self) -> Result<Vec<&VariantAxis>, VariationError> {
        let catalog = self.catalog.require()?;
        Ok(self
            .active_axes
            .iter()
            .filter_map(|name| catalog.axis(name))
            .collect())
    }

    /// Parse the raw add form against the active axes.
    pub fn parse_add_form(&self, raw: &Map<String, Value>) -> Result<Selection, FieldErrors> {
        let axes: Vec<VariantAxis> = self
            .active_axes()
            .map_err(|e| FieldErrors(vec![FieldError::new("variants", e.to_string())]))?
            .into_iter()
            .cloned()
            .collect();
        form::parse_selection(raw, &axes)
    }

    /// Fold a new selection into the collection.
    pub fn add(&mut self, selection: &Selection, total: Quantity) -> Result<(), VariationError> {
        self.ensure_editable("add variation")?;
        let catalog = self.catalog.require()?;
        let entry = VariationEntry::from_selection(catalog, selection)?;

        if self.config.enforce_capacity_on_add {
            quantity::ensure_capacity(total, &self.collection, entry.qty)?;
        }

        self.collection = merge(&self.collection, entry)?;
        Ok(())
    }

    /// Open a draft for the entry at `location`.
    pub fn begin_edit(&mut self, location: usize) -> Result<&EditDraft, VariationError> {
        self.ensure_editable("edit variation")?;
        let catalog = self.catalog.require()?;
        let entry = self.collection.require(location)?;
        let draft = editor::begin_edit(entry, catalog, location)?;
        Ok(self.draft.insert(draft))
    }

    /// Save the open draft into its slot.
    pub fn commit_edit(&mut self) -> Result<(), VariationError> {
        self.ensure_editable("save variation")?;
        let draft = self.draft.as_ref().ok_or(VariationError::InvalidState {
            state: "not editing",
            operation: "save variation",
        })?;
        let catalog = self.catalog.require()?;
        self.collection = editor::commit_edit(&self.collection, draft, catalog)?;
        self.draft = None;
        Ok(())
    }

    /// Discard the open draft.
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Remove the entry at `index`.
    pub fn delete(&mut self, index: usize) -> Result<(), VariationError> {
        self.ensure_editable("delete variation")?;
        self.collection = editor::delete_at(&self.collection, index)?;
        self.draft = self.draft.take().and_then(|mut draft| match draft.location.cmp(&index) {
            Ordering::Equal => None,
            Ordering::Greater => {
                draft.location -= 1;
                Some(draft)
            }
            Ordering::Less => Some(draft),
        });
        Ok(())
    }

    /// Quantity not yet assigned to a variation.
    pub fn remaining(&self, total: Quantity) -> i64 {
        quantity::remaining(total, &self.collection)
    }

    /// Hint for the add form.
    pub fn capacity_message(&self, total: Quantity) -> String {
        quantity::capacity_message(self.remaining(total))
    }

    /// Validate and, on success, freeze the session and build the payload.
    ///
    /// The session's variation mode overrides the draft's flag.
    pub fn submit(&mut self, mut product: ProductDraft) -> Result<ProductPayload, SubmitError> {
        self.ensure_editable("submit")?;
        product.variations_enabled = self.enabled;

        let empty = VariantCatalog::default();
        let catalog = match self.catalog.require() {
            Ok(catalog) => catalog,
            Err(_) if !self.enabled && self.collection.is_empty() => &empty,
            Err(e) => return Err(e.into()),
        };

        let validated = validate_submission(&self.collection, &product, catalog, &self.config);
        if let Err(errors) = validated {
            tracing::warn!(
                errors = errors.len(),
                entries = self.collection.len(),
                "product submission rejected"
            );
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }

        self.errors = ValidationErrors::new();
        self.draft = None;
        self.submitted = true;
        tracing::debug!(entries = self.collection.len(), "product submitted");
        Ok(product.into_payload(&self.collection))
    }

    fn ensure_editable(&self, operation: &'static str) -> Result<(), VariationError> {
        if self.submitted {
            return Err(VariationError::InvalidState {
                state: SessionState::Submitted.as_str(),
                operation,
            });
        }
        Ok(())
    }
}

impl Default for VariationSession {
    fn default() -> Self {
        Self::new(VariationConfig::default())
    }
}
