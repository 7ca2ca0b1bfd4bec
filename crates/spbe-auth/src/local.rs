//! Built-in identity provider backed by the service database.
//!
//! Passwords are stored as Argon2id PHC strings; sessions are random opaque
//! tokens with a fixed lifetime.

use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use base64::Engine as _;
use chrono::{Duration, Utc};
use spbe_core::identity::{AuthIdentity, AuthSession};
use spbe_core::ids::PREFIX_USER;
use spbe_db::repos::credential::CredentialRecord;
use spbe_db::service::SpbeService;

use crate::error::AuthError;
use crate::provider::IdentityProvider;

const TOKEN_BYTES: usize = 32;
const SALT_BYTES: usize = 16;

pub struct LocalIdentityProvider {
    db: Arc<SpbeService>,
    session_ttl: Duration,
}

impl LocalIdentityProvider {
    #[must_use]
    pub const fn new(db: Arc<SpbeService>, session_ttl: Duration) -> Self {
        Self { db, session_ttl }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn argon2_hash(password: &str) -> Result<String, AuthError> {
    let mut salt = [0u8; SALT_BYTES];
    getrandom::fill(&mut salt).map_err(|e| AuthError::Hashing(format!("salt: {e}")))?;
    let salt = SaltString::encode_b64(&salt).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

fn argon2_verify(password: &str, phc: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(phc).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Argon2 is CPU-bound; run it off the async workers.
async fn hash_password(password: &str) -> Result<String, AuthError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || argon2_hash(&password))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
}

async fn verify_password(password: &str, phc: &str) -> Result<bool, AuthError> {
    let (password, phc) = (password.to_owned(), phc.to_owned());
    tokio::task::spawn_blocking(move || argon2_verify(&password, &phc))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
}

fn new_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| AuthError::Provider(format!("token: {e}")))?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn register(&self, email: &str, password: &str) -> Result<AuthIdentity, AuthError> {
        let email = normalize_email(email);
        if self.db.find_credential_by_email(&email).await?.is_some() {
            return Err(AuthError::AlreadyRegistered);
        }
        let user_id = self.db.db().generate_id(PREFIX_USER).await?;
        self.db
            .create_credential(&CredentialRecord {
                user_id: user_id.clone(),
                email: email.clone(),
                password_hash: hash_password(password).await?,
            })
            .await?;
        tracing::info!(user_id = %user_id, "identity registered");
        Ok(AuthIdentity { id: user_id, email })
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AuthIdentity, AuthSession), AuthError> {
        let email = normalize_email(email);
        let Some(credential) = self.db.find_credential_by_email(&email).await? else {
            tracing::debug!("login for unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(password, &credential.password_hash).await? {
            tracing::debug!(user_id = %credential.user_id, "login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        self.db.purge_expired_sessions().await?;
        let token = new_token()?;
        let expires_at = Utc::now() + self.session_ttl;
        self.db
            .insert_session(&token, &credential.user_id, expires_at)
            .await?;

        tracing::info!(user_id = %credential.user_id, "session started");
        Ok((
            AuthIdentity {
                id: credential.user_id,
                email: credential.email,
            },
            AuthSession::bearer(token, Some(expires_at)),
        ))
    }

    async fn resolve_token(&self, token: &str) -> Result<Option<AuthIdentity>, AuthError> {
        Ok(self
            .db
            .find_session(token)
            .await?
            .map(|session| session.identity))
    }

    async fn end_session(&self, token: &str) -> Result<(), AuthError> {
        if self.db.delete_session(token).await? {
            tracing::debug!("session ended");
        }
        Ok(())
    }

    async fn discard_identity(&self, identity: &AuthIdentity) -> Result<(), AuthError> {
        self.db.delete_credential(&identity.id).await?;
        tracing::warn!(user_id = %identity.id, "identity discarded after failed profile mirror");
        Ok(())
    }
}
