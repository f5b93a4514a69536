//! Per-table classification
//!
//! A [`TableClassifier`] is built once per table from the table's current
//! foreign keys, indexes and primary key, and answers classification
//! queries read-only thereafter: entity type, bridge-table detection,
//! foreign-key cardinality, and index coverage. Classification is a pure
//! function of the frozen snapshot; mutating the table afterwards
//! invalidates the classifier.

mod classifier;
mod error;
mod types;

pub use classifier::TableClassifier;
pub use error::ClassifierError;
pub use types::EntityType;
