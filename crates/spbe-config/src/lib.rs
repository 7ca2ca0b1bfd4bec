//! # spbe-config
//!
//! Layered configuration loading for the SPBE evidence service using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SPBE_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `./spbe.toml`
//! 4. User-level `~/.config/spbe/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SPBE_SERVER__PORT` -> `server.port`, `SPBE_STORAGE__BACKEND` -> `storage.backend`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use spbe_config::SpbeConfig;
//!
//! let config = SpbeConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind_addr());
//! ```

mod auth;
mod database;
mod error;
mod server;
mod storage;

pub use auth::{AuthConfig, AuthProvider};
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOCAL_CONFIG_FILE: &str = "spbe.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SpbeConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl SpbeConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration with an additional TOML file layered above the
    /// project-local one.
    pub fn load_from(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with(extra).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load `.env` from the current directory before
    /// building the figment.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain without the `--config` layer.
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment_with(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("SPBE_").split("__"))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_upload_bytes".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.database.path.is_empty() && !self.database.is_remote() {
            return Err(ConfigError::NotConfigured {
                section: "database".into(),
            });
        }
        self.storage.validate()?;
        self.auth.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("spbe").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SpbeConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.database.is_remote());
        assert_eq!(config.auth.provider, AuthProvider::Local);
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = SpbeConfig::figment();
        let config: SpbeConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.bucket, "bukti_dukung_spbe");
    }

    #[test]
    fn zero_body_limit_rejected() {
        let mut config = SpbeConfig::default();
        config.server.max_upload_bytes = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
