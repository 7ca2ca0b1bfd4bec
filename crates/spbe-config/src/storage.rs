//! Blob storage configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Which object store backs evidence files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Files under `root` on the local filesystem.
    #[default]
    Local,
    /// Process memory. Lost on restart.
    Memory,
    /// S3-compatible bucket.
    S3,
}

fn default_root() -> String {
    String::from("storage")
}

fn default_bucket() -> String {
    String::from("bukti_dukung_spbe")
}

fn default_region() -> String {
    String::from("auto")
}

const fn default_cleanup_interval_secs() -> u64 {
    60
}

const fn default_cleanup_max_attempts() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory for the local backend. The bucket is a subdirectory.
    #[serde(default = "default_root")]
    pub root: String,

    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Custom S3 endpoint (MinIO, R2, ...). Empty means AWS.
    #[serde(default)]
    pub endpoint: String,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// Seconds between sweeps of the blob cleanup queue.
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,

    /// Attempts before a queued blob deletion is dropped.
    #[serde(default = "default_cleanup_max_attempts")]
    pub cleanup_max_attempts: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            root: default_root(),
            bucket: default_bucket(),
            endpoint: String::new(),
            region: default_region(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
            cleanup_max_attempts: default_cleanup_max_attempts(),
        }
    }
}

impl StorageConfig {
    /// Check if the selected backend has its required fields.
    pub fn is_configured(&self) -> bool {
        match self.backend {
            StorageBackend::Local => !self.root.is_empty() && !self.bucket.is_empty(),
            StorageBackend::Memory => !self.bucket.is_empty(),
            StorageBackend::S3 => {
                !self.bucket.is_empty()
                    && !self.access_key_id.is_empty()
                    && !self.secret_access_key.is_empty()
            }
        }
    }

    /// Validate the section, naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cleanup_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.cleanup_interval_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.cleanup_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.cleanup_max_attempts".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "storage".into(),
            });
        }
        Ok(())
    }
}
