//! Error types for table classification

use thiserror::Error;

/// Errors that can occur when building a classifier
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// The table's crawled metadata is incomplete; classifying it would
    /// silently produce wrong answers
    #[error("cannot classify metadata-partial table: {table}")]
    PartialTable { table: String },
}
