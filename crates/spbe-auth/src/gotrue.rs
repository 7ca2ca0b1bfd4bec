//! Adapter for a GoTrue-compatible hosted auth service (e.g. Supabase Auth).
//!
//! Calls the REST API directly via `reqwest`.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use spbe_core::identity::{AuthIdentity, AuthSession};

use crate::error::AuthError;
use crate::provider::IdentityProvider;

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoTrueToken {
    access_token: String,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: GoTrueUser,
}

/// `/signup` answers with a session when autoconfirm is on, a bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignupResponse {
    Session { user: GoTrueUser },
    User(GoTrueUser),
}

pub struct GoTrueIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoTrueIdentityProvider {
    #[must_use]
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Pull the human-readable message out of a GoTrue error body.
async fn error_message(resp: reqwest::Response) -> String {
    let status = resp.status();
    match resp.json::<serde_json::Value>().await {
        Ok(body) => ["msg", "error_description", "message", "error"]
            .iter()
            .find_map(|key| body[*key].as_str().map(String::from))
            .unwrap_or_else(|| status.to_string()),
        Err(_) => status.to_string(),
    }
}

fn transport(e: &reqwest::Error) -> AuthError {
    AuthError::Provider(e.to_string())
}

fn session_expiry(token: &GoTrueToken) -> Option<DateTime<Utc>> {
    token
        .expires_at
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .or_else(|| {
            token
                .expires_in
                .and_then(Duration::try_seconds)
                .map(|ttl| Utc::now() + ttl)
        })
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn register(&self, email: &str, password: &str) -> Result<AuthIdentity, AuthError> {
        let resp = self
            .client
            .post(self.url("/signup"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let status = resp.status();
        if !status.is_success() {
            let message = error_message(resp).await;
            tracing::debug!(%status, message = %message, "gotrue signup rejected");
            if message.to_lowercase().contains("already registered") {
                return Err(AuthError::AlreadyRegistered);
            }
            return Err(if status.is_client_error() {
                AuthError::Validation(message)
            } else {
                AuthError::Provider(message)
            });
        }

        let user = match resp
            .json::<SignupResponse>()
            .await
            .map_err(|e| AuthError::Provider(format!("parse signup: {e}")))?
        {
            SignupResponse::Session { user } | SignupResponse::User(user) => user,
        };
        Ok(AuthIdentity {
            id: user.id,
            email: user.email.unwrap_or_else(|| email.to_string()),
        })
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AuthIdentity, AuthSession), AuthError> {
        let resp = self
            .client
            .post(self.url("/token?grant_type=password"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| transport(&e))?;

        match resp.status() {
            s if s.is_success() => {}
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                return Err(AuthError::InvalidCredentials);
            }
            _ => return Err(AuthError::Provider(error_message(resp).await)),
        }

        let token: GoTrueToken = resp
            .json()
            .await
            .map_err(|e| AuthError::Provider(format!("parse token: {e}")))?;
        let expires_at = session_expiry(&token);
        Ok((
            AuthIdentity {
                id: token.user.id,
                email: token.user.email.unwrap_or_else(|| email.to_string()),
            },
            AuthSession::bearer(token.access_token, expires_at),
        ))
    }

    async fn resolve_token(&self, token: &str) -> Result<Option<AuthIdentity>, AuthError> {
        let resp = self
            .client
            .get(self.url("/user"))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| transport(&e))?;

        match resp.status() {
            s if s.is_success() => {
                let user: GoTrueUser = resp
                    .json()
                    .await
                    .map_err(|e| AuthError::Provider(format!("parse user: {e}")))?;
                Ok(Some(AuthIdentity {
                    id: user.id,
                    email: user.email.unwrap_or_default(),
                }))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Err(AuthError::Provider(error_message(resp).await)),
        }
    }

    async fn end_session(&self, token: &str) -> Result<(), AuthError> {
        let resp = self
            .client
            .post(self.url("/logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let status = resp.status();
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        Err(AuthError::Provider(error_message(resp).await))
    }

    async fn discard_identity(&self, identity: &AuthIdentity) -> Result<(), AuthError> {
        // Deleting users needs the admin API and a service-role key.
        tracing::warn!(user_id = %identity.id, "gotrue identity left without a profile");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn signup_accepts_both_shapes() {
        let wrapped: SignupResponse =
            serde_json::from_str(r#"{"access_token":"t","user":{"id":"u1","email":"a@b.id"}}"#).unwrap();
        let bare: SignupResponse = serde_json::from_str(r#"{"id":"u2","email":"c@d.id"}"#).unwrap();
        assert!(matches!(wrapped, SignupResponse::Session { user } if user.id == "u1"));
        assert!(matches!(bare, SignupResponse::User(user) if user.id == "u2"));
    }

    #[test]
    fn expiry_prefers_absolute_timestamp() {
        let token = GoTrueToken {
            access_token: "t".into(),
            expires_at: Some(1_700_000_000),
            expires_in: Some(3600),
            user: GoTrueUser {
                id: "u".into(),
                email: None,
            },
        };
        assert_eq!(
            session_expiry(&token),
            DateTime::from_timestamp(1_700_000_000, 0)
        );
    }

    #[test]
    fn base_url_is_trimmed() {
        let idp = GoTrueIdentityProvider::new("https://auth.example.go.id/auth/v1/", "anon");
        assert_eq!(idp.url("/user"), "https://auth.example.go.id/auth/v1/user");
    }
}
