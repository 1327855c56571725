//! Validation configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Limits applied when composing and validating variations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationConfig {
    /// Per-entry quantity ceiling; unlimited when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_qty_per_entry: Option<u32>,

    /// Reject adds that would allocate more than the declared total.
    #[serde(default = "default_true")]
    pub enforce_capacity_on_add: bool,

    /// Product field rules.
    #[serde(default)]
    pub product: ProductRules,
}

fn default_true() -> bool {
    true
}

impl Default for VariationConfig {
    fn default() -> Self {
        Self {
            max_qty_per_entry: None,
            enforce_capacity_on_add: true,
            product: ProductRules::default(),
        }
    }
}

impl VariationConfig {
    /// Load config from a file. `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: display,
                source,
            })
        } else {
            Self::from_toml(&content).map_err(|source| ConfigError::Toml {
                path: display,
                source,
            })
        }
    }

    /// Parse TOML config text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Schema limits for the product fields submitted alongside variations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRules {
    #[serde(default = "default_title_max_len")]
    pub title_max_len: usize,

    #[serde(default = "default_description_max_len")]
    pub description_max_len: usize,

    #[serde(default = "default_min_price")]
    pub min_price: u64,

    #[serde(default = "default_min_quantity")]
    pub min_quantity: u32,
}

fn default_title_max_len() -> usize {
    100
}

fn default_description_max_len() -> usize {
    2000
}

fn default_min_price() -> u64 {
    1
}

fn default_min_quantity() -> u32 {
    1
}

impl Default for ProductRules {
    fn default() -> Self {
        Self {
            title_max_len: default_title_max_len(),
            description_max_len: default_description_max_len(),
            min_price: default_min_price(),
            min_quantity: default_min_quantity(),
        }
    }
}
