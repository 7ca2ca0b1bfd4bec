use std::sync::Arc;

use spbe_auth::IdentityProvider;
use spbe_config::SpbeConfig;
use spbe_db::service::SpbeService;
use spbe_storage::BlobStore;

/// Handles shared by every request. Built once by the composition root.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<SpbeService>,
    pub blobs: Arc<dyn BlobStore>,
    pub idp: Arc<dyn IdentityProvider>,
    pub config: Arc<SpbeConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(
        db: Arc<SpbeService>,
        blobs: Arc<dyn BlobStore>,
        idp: Arc<dyn IdentityProvider>,
        config: SpbeConfig,
    ) -> Self {
        Self {
            db,
            blobs,
            idp,
            config: Arc::new(config),
        }
    }
}
