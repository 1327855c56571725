//! Variant axis and instance types.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::VariationError;

/// One concrete value of an axis (e.g., "red").
///
/// Identity is by `name`; the remote id, when present, is carried along but
/// ignored by equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantInstance {
    /// Instance label.
    pub name: String,
    /// Remote identifier, if the catalog supplies one.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl VariantInstance {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
        }
    }

    /// Attach the remote identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl PartialEq for VariantInstance {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for VariantInstance {}

impl Hash for VariantInstance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// One selectable dimension of product variation (e.g., "color").
///
/// `instances` order is the index space used by edit drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAxis {
    /// Axis identifier.
    pub name: String,
    /// Ordered instances.
    #[serde(default)]
    pub instances: Vec<VariantInstance>,
}

impl VariantAxis {
    /// Build an axis from instance names.
    pub fn new<I, S>(name: impl Into<String>, instances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            instances: instances.into_iter().map(VariantInstance::new).collect(),
        }
    }

    /// Position of the first instance called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.instances.iter().position(|i| i.name == name)
    }

    /// Instance at `index`.
    pub fn instance_at(&self, index: usize) -> Option<&VariantInstance> {
        self.instances.get(index)
    }
}

/// The axes available for one form session.
///
/// Axis names and instance names are expected to be unique; lookups take the
/// first match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantCatalog {
    axes: Vec<VariantAxis>,
}

impl VariantCatalog {
    pub fn new(axes: Vec<VariantAxis>) -> Self {
        let catalog = Self { axes };
        for name in catalog.duplicate_names() {
            tracing::warn!(name = %name, "duplicate name in variant catalog, first match wins");
        }
        catalog
    }

    pub fn axes(&self) -> &[VariantAxis] {
        &self.axes
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// Look up an axis by name.
    pub fn axis(&self, name: &str) -> Option<&VariantAxis> {
        self.axes.iter().find(|a| a.name == name)
    }

    /// Look up an axis, failing with [`VariationError::AxisNotFound`].
    pub fn require_axis(&self, name: &str) -> Result<&VariantAxis, VariationError> {
        self.axis(name).ok_or_else(|| VariationError::AxisNotFound {
            axis: name.to_string(),
        })
    }

    /// Position of `instance` within `axis`.
    pub fn position_of(&self, axis: &str, instance: &str) -> Result<usize, VariationError> {
        self.require_axis(axis)?
            .position(instance)
            .ok_or_else(|| VariationError::InstanceNotFound {
                axis: axis.to_string(),
                instance: instance.to_string(),
            })
    }

    /// Instance stored at `index` within `axis`.
    pub fn instance_at(
        &self,
        axis: &str,
        index: usize,
    ) -> Result<&VariantInstance, VariationError> {
        let found = self.require_axis(axis)?;
        found
            .instance_at(index)
            .ok_or_else(|| VariationError::InstanceIndexOutOfRange {
                axis: axis.to_string(),
                index,
                len: found.instances.len(),
            })
    }

    /// Whether `axis` offers an instance called `instance`.
    pub fn contains(&self, axis: &str, instance: &str) -> bool {
        self.axis(axis)
            .map(|a| a.position(instance).is_some())
            .unwrap_or(false)
    }

    /// Axis names, and `axis/instance` pairs, that occur more than once.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut duplicates = Vec::new();
        for (i, axis) in self.axes.iter().enumerate() {
            if self.axes[..i].iter().any(|a| a.name == axis.name) {
                duplicates.push(axis.name.clone());
            }
            for (j, instance) in axis.instances.iter().enumerate() {
                if axis.instances[..j].iter().any(|x| x.name == instance.name) {
                    duplicates.push(format!("{}/{}", axis.name, instance.name));
                }
            }
        }
        duplicates
    }
}

impl From<Vec<VariantAxis>> for VariantCatalog {
    fn from(axes: Vec<VariantAxis>) -> Self {
        Self::new(axes)
    }
}
