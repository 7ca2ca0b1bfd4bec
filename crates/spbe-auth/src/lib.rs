//! # spbe-auth
//!
//! Identity provider adapters for the SPBE evidence service.
//!
//! [`IdentityProvider`] exchanges credentials for opaque bearer sessions and
//! resolves tokens back to identities. Two implementations:
//! - [`LocalIdentityProvider`]: Argon2id credentials and sessions in the
//!   service's own libSQL database.
//! - [`GoTrueIdentityProvider`]: a hosted GoTrue-compatible auth service,
//!   called over HTTP with `reqwest`.

pub mod error;
pub mod gotrue;
pub mod local;
pub mod provider;
pub mod registration;

use std::sync::Arc;

pub use error::AuthError;
pub use gotrue::GoTrueIdentityProvider;
pub use local::LocalIdentityProvider;
pub use provider::IdentityProvider;
pub use registration::Registration;

use spbe_config::{AuthConfig, AuthProvider};
use spbe_db::service::SpbeService;

/// Build the provider selected by `auth.provider`.
///
/// # Errors
///
/// `AuthError::Provider` if the gotrue backend lacks its URL or key.
pub fn from_config(
    config: &AuthConfig,
    db: Arc<SpbeService>,
) -> Result<Arc<dyn IdentityProvider>, AuthError> {
    match config.provider {
        AuthProvider::Local => {
            let ttl = i64::try_from(config.session_ttl_secs)
                .ok()
                .and_then(chrono::Duration::try_seconds)
                .ok_or_else(|| AuthError::Provider("auth.session_ttl_secs is too large".into()))?;
            tracing::info!(ttl_secs = config.session_ttl_secs, "using local identity provider");
            Ok(Arc::new(LocalIdentityProvider::new(db, ttl)))
        }
        AuthProvider::Gotrue => {
            if !config.is_configured() {
                return Err(AuthError::Provider(
                    "auth.gotrue_url and auth.gotrue_api_key are required".into(),
                ));
            }
            tracing::info!(url = %config.gotrue_url, "using gotrue identity provider");
            Ok(Arc::new(GoTrueIdentityProvider::new(
                &config.gotrue_url,
                config.gotrue_api_key.clone(),
            )))
        }
    }
}
