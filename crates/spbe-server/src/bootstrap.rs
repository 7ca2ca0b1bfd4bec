use std::sync::Arc;

use anyhow::Context;
use spbe_config::{DatabaseConfig, SpbeConfig};
use spbe_db::service::SpbeService;
use spbe_storage::{BlobStore, ObjectBlobStore};

use crate::cli::GlobalFlags;
use crate::http::AppState;

/// Load `.env`, then the layered configuration plus any `--config` file.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SpbeConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env"),
    }

    SpbeConfig::load_from(flags.config.as_deref()).context("failed to load configuration")
}

/// Open the configured database. Migrations run on open.
pub async fn open_database(config: &DatabaseConfig) -> anyhow::Result<SpbeService> {
    if config.is_remote() {
        tracing::info!(url = %config.url, "opening remote database");
        SpbeService::new_remote(&config.url, &config.auth_token)
            .await
            .with_context(|| format!("failed to open remote database at {}", config.url))
    } else {
        tracing::info!(path = %config.path, "opening local database");
        SpbeService::new_local(&config.path)
            .await
            .with_context(|| format!("failed to open database at {}", config.path))
    }
}

/// Build the shared handles every request works through.
pub async fn build_state(config: SpbeConfig) -> anyhow::Result<AppState> {
    let db = Arc::new(open_database(&config.database).await?);

    let blobs: Arc<dyn BlobStore> = Arc::new(
        ObjectBlobStore::from_config(&config.storage)
            .context("failed to initialize blob storage")?,
    );

    let idp = spbe_auth::from_config(&config.auth, Arc::clone(&db))
        .context("failed to initialize identity provider")?;

    Ok(AppState::new(db, blobs, idp, config))
}
