//! Crate-level error type

use thiserror::Error;

use crate::classify::ClassifierError;
use crate::er::AssemblerError;

/// Errors that can occur during schema analysis
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Table classification failed
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    /// Model assembly failed
    #[error(transparent)]
    Assembler(#[from] AssemblerError),
}
