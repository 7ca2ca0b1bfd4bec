//! Storage error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid blob path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Storage configuration error: {0}")]
    Configuration(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
