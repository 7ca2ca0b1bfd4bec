use async_trait::async_trait;
use spbe_core::identity::{AuthIdentity, AuthSession};

use crate::error::AuthError;

/// Exchanges credentials for bearer sessions and resolves tokens to identities.
///
/// Every request resolves its own token; nothing is cached in process.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an identity. Profile mirroring is the caller's job.
    async fn register(&self, email: &str, password: &str) -> Result<AuthIdentity, AuthError>;

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AuthIdentity, AuthSession), AuthError>;

    /// `None` for unknown or expired tokens.
    async fn resolve_token(&self, token: &str) -> Result<Option<AuthIdentity>, AuthError>;

    async fn end_session(&self, token: &str) -> Result<(), AuthError>;

    /// Best-effort removal of an identity whose profile could not be mirrored.
    async fn discard_identity(&self, identity: &AuthIdentity) -> Result<(), AuthError>;
}
