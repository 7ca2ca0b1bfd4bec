//! # spbe-storage
//!
//! Blob storage for uploaded evidence files.
//!
//! [`BlobStore`] is the capability the HTTP layer depends on. [`ObjectBlobStore`]
//! implements it over `object_store` with three backends selected by
//! `storage.backend`: a local directory, process memory, or an S3-compatible
//! bucket.

mod error;
mod store;

pub use error::{StorageError, StorageResult};
pub use store::{BlobStore, ObjectBlobStore};
