//! Credentials and bearer sessions for the built-in identity provider.
//!
//! Password hashing happens in `spbe-auth`; this layer only stores PHC
//! strings and opaque tokens.

use chrono::{DateTime, Utc};
use spbe_core::identity::AuthIdentity;

use crate::error::DatabaseError;
use crate::helpers::{now_text, parse_datetime};
use crate::service::SpbeService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub user_id: String,
    pub email: String,
    pub password_hash: String,
}

/// A live bearer session joined to its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub identity: AuthIdentity,
    pub expires_at: DateTime<Utc>,
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

impl SpbeService {
    pub async fn create_credential(&self, record: &CredentialRecord) -> Result<(), DatabaseError> {
        let (_, now) = now_text();
        self.db()
            .execute(
                "INSERT INTO credentials (user_id, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    record.user_id.as_str(),
                    record.email.as_str(),
                    record.password_hash.as_str(),
                    now.as_str()
                ],
            )
            .await?;
        Ok(())
    }

    pub async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CredentialRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT user_id, email, password_hash FROM credentials WHERE email = ?1",
                [email],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(CredentialRecord {
                user_id: row.get::<String>(0)?,
                email: row.get::<String>(1)?,
                password_hash: row.get::<String>(2)?,
            })),
            None => Ok(None),
        }
    }

    /// Remove a credential and, by cascade, its sessions.
    pub async fn delete_credential(&self, user_id: &str) -> Result<(), DatabaseError> {
        self.db()
            .execute("DELETE FROM credentials WHERE user_id = ?1", [user_id])
            .await?;
        Ok(())
    }

    pub async fn insert_session(
        &self,
        token: &str,
        user_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let (_, now) = now_text();
        let expires = timestamp(expires_at);
        self.db()
            .execute(
                "INSERT INTO auth_sessions (token, user_id, expires_at, created_at) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![token, user_id, expires.as_str(), now.as_str()],
            )
            .await?;
        Ok(())
    }

    /// Look up an unexpired session. Expired and unknown tokens both yield `None`.
    pub async fn find_session(&self, token: &str) -> Result<Option<SessionRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT c.user_id, c.email, s.expires_at
                 FROM auth_sessions s
                 JOIN credentials c ON c.user_id = s.user_id
                 WHERE s.token = ?1",
                [token],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let expires_at = parse_datetime(&row.get::<String>(2)?)?;
        if expires_at <= Utc::now() {
            return Ok(None);
        }
        Ok(Some(SessionRecord {
            identity: AuthIdentity {
                id: row.get::<String>(0)?,
                email: row.get::<String>(1)?,
            },
            expires_at,
        }))
    }

    /// Returns whether a session was removed.
    pub async fn delete_session(&self, token: &str) -> Result<bool, DatabaseError> {
        let affected = self
            .db()
            .execute("DELETE FROM auth_sessions WHERE token = ?1", [token])
            .await?;
        Ok(affected > 0)
    }

    pub async fn purge_expired_sessions(&self) -> Result<u64, DatabaseError> {
        let (_, now) = now_text();
        let purged = self
            .db()
            .execute("DELETE FROM auth_sessions WHERE expires_at <= ?1", [now.as_str()])
            .await?;
        if purged > 0 {
            tracing::debug!(purged, "expired sessions purged");
        }
        Ok(purged)
    }
}
