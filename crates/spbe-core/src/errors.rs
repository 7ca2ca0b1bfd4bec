//! Cross-cutting error types for SPBE.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `StorageError`) are defined in
//! their respective crates. They all converge into `ApiError` in `spbe-server`.

use thiserror::Error;

/// Errors that can be raised by any SPBE crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (format, enum membership, constraints).
    #[error("{0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
