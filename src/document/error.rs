//! Errors raised by document mutators.

use thiserror::Error;

/// Why a document mutator refused a primitive mutation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    /// The mutation would leave the document structurally invalid
    #[error("mutation rejected: {0}")]
    Validation(String),
    /// The target identity or index is absent at call time
    #[error("target not found: {0}")]
    NotFound(String),
}

impl MutationError {
    pub fn validation(message: impl Into<String>) -> Self {
        MutationError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        MutationError::NotFound(message.into())
    }
}

/// Result of a single primitive mutation
pub type MutationResult = Result<(), MutationError>;
