use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Authenticated user identity as reported by the identity provider.
///
/// Produced by `spbe-auth`, consumed by `spbe-db` (profile lookup) and
/// `spbe-server`. Contains only data fields.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthIdentity {
    /// Identity provider user id. Also the primary key of the profile row.
    pub id: String,
    pub email: String,
}

/// An issued session. `access_token` is an opaque bearer string.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    #[must_use]
    pub fn bearer(access_token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "bearer".to_string(),
            expires_at,
        }
    }
}
