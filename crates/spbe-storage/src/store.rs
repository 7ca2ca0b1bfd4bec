//! `BlobStore` trait and its `object_store` implementation.

use std::path::Path as FsPath;
use std::sync::Arc;

use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, AttributeValue, Attributes, ObjectStore, PutOptions, PutPayload};
use spbe_config::{StorageBackend, StorageConfig};

use crate::error::{StorageError, StorageResult};

/// Binary persistence for uploaded files, keyed by path within one bucket.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Name of the bucket every path is relative to.
    fn bucket(&self) -> &str;

    /// Store `data` at `path`, replacing any existing blob.
    async fn put(&self, path: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()>;

    async fn get(&self, path: &str) -> StorageResult<Vec<u8>>;

    async fn exists(&self, path: &str) -> StorageResult<bool>;

    /// Remove the blob at `path`. Removing an absent blob succeeds.
    async fn delete(&self, path: &str) -> StorageResult<()>;
}

pub struct ObjectBlobStore {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    backend: StorageBackend,
}

impl ObjectBlobStore {
    /// Process-local store. Contents vanish with the process.
    #[must_use]
    pub fn in_memory(bucket: impl Into<String>) -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            bucket: bucket.into(),
            backend: StorageBackend::Memory,
        }
    }

    /// Store blobs under `{root}/{bucket}/`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// `StorageError::Io` if the directory cannot be created.
    pub fn local(root: impl AsRef<FsPath>, bucket: impl Into<String>) -> StorageResult<Self> {
        let bucket = bucket.into();
        let dir = root.as_ref().join(&bucket);
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            store: Arc::new(LocalFileSystem::new_with_prefix(&dir)?),
            bucket,
            backend: StorageBackend::Local,
        })
    }

    /// S3-compatible bucket. A non-empty `endpoint` targets MinIO, R2 and
    /// similar services.
    ///
    /// # Errors
    ///
    /// `StorageError::ObjectStore` if the client cannot be built.
    pub fn s3(config: &StorageConfig) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key);
        if !config.endpoint.is_empty() {
            builder = builder
                .with_endpoint(&config.endpoint)
                .with_allow_http(config.endpoint.starts_with("http://"));
        }
        Ok(Self {
            store: Arc::new(builder.build()?),
            bucket: config.bucket.clone(),
            backend: StorageBackend::S3,
        })
    }

    /// Build the backend named by `storage.backend`.
    ///
    /// # Errors
    ///
    /// `StorageError::Configuration` if the section is incomplete.
    pub fn from_config(config: &StorageConfig) -> StorageResult<Self> {
        if !config.is_configured() {
            return Err(StorageError::Configuration(format!(
                "storage backend {:?} is missing required settings",
                config.backend
            )));
        }
        let store = match config.backend {
            StorageBackend::Local => Self::local(&config.root, config.bucket.clone())?,
            StorageBackend::Memory => Self::in_memory(config.bucket.clone()),
            StorageBackend::S3 => Self::s3(config)?,
        };
        tracing::info!(backend = ?config.backend, bucket = %config.bucket, "blob store ready");
        Ok(store)
    }

    fn location(path: &str) -> StorageResult<Path> {
        if path.is_empty() {
            return Err(StorageError::InvalidPath {
                path: String::new(),
                reason: "path is empty".into(),
            });
        }
        Path::parse(path).map_err(|e| StorageError::InvalidPath {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    fn put_options(&self, content_type: &str) -> PutOptions {
        // The local filesystem backend rejects attributes.
        if self.backend == StorageBackend::Local {
            return PutOptions::default();
        }
        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );
        PutOptions {
            attributes,
            ..PutOptions::default()
        }
    }
}

#[async_trait]
impl BlobStore for ObjectBlobStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put(&self, path: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()> {
        let location = Self::location(path)?;
        let size = data.len();
        self.store
            .put_opts(&location, PutPayload::from(data), self.put_options(content_type))
            .await?;
        tracing::debug!(bucket = %self.bucket, path, size, "blob stored");
        Ok(())
    }

    async fn get(&self, path: &str) -> StorageResult<Vec<u8>> {
        let location = Self::location(path)?;
        match self.store.get(&location).await {
            Ok(result) => Ok(result.bytes().await?.to_vec()),
            Err(object_store::Error::NotFound { .. }) => Err(StorageError::NotFound(path.into())),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        let location = Self::location(path)?;
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, path: &str) -> StorageResult<()> {
        let location = Self::location(path)?;
        match self.store.delete(&location).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => {
                tracing::debug!(bucket = %self.bucket, path, "blob deleted");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
