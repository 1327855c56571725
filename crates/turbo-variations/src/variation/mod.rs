//! Variation entries and the operations that fold them into a collection.

mod collection;
mod entry;
mod matcher;
mod merge;

pub use collection::VariationCollection;
pub use entry::{Selection, VariationEntry};
pub use matcher::{find_collisions, find_match, matches};
pub use merge::merge;
