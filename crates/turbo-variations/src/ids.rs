//! Newtype IDs for the remote records a product draft points at.
//!
//! The persistence API keys categories, sub-categories and brands by
//! 24-character hexadecimal object ids.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a hex-encoded object id.
pub const OBJECT_ID_LEN: usize = 24;

/// Check whether `s` looks like a hex-encoded object id.
pub fn is_object_id(s: &str) -> bool {
    s.len() == OBJECT_ID_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A remote object identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an id without checking its format.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Wrap an id, rejecting anything that is not an object id.
            pub fn parse(id: impl Into<String>) -> Option<Self> {
                let id = id.into();
                is_object_id(&id).then_some(Self(id))
            }

            /// Whether the wrapped id has object-id format.
            pub fn is_valid(&self) -> bool {
                is_object_id(&self.0)
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(CategoryId);
define_id!(SubCategoryId);
define_id!(BrandId);
