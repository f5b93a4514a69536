//! Error types for model assembly

use thiserror::Error;

use crate::classify::ClassifierError;

/// Errors that can occur while assembling the conceptual model
///
/// These indicate assembler defects or broken input invariants, never
/// tolerable degradations; they are raised loudly instead of being
/// swallowed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblerError {
    /// A resolved entity's table key disagrees with the table reference it
    /// was resolved for
    #[error("relationship endpoint mismatch: reference names {expected}, entity wraps {found}")]
    EndpointMismatch { expected: String, found: String },

    /// A table reference points at a table missing from the catalog
    #[error("reference to unknown table: {table}")]
    UnknownTable { table: String },

    /// Classification failed for a table that was expected to be
    /// classifiable
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}
