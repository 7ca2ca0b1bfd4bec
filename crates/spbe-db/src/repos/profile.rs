//! Profile repository: the local mirror of identity-provider users.

use serde::{Deserialize, Serialize};
use spbe_core::entities::Profile;
use spbe_core::enums::Role;
use spbe_core::identity::AuthIdentity;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, now_text, parse_datetime, parse_enum};
use crate::repos::unit::row_to_opt_unit;
use crate::service::SpbeService;

const SELECT_COLS: &str = "SELECT p.id, p.email, p.nama_lengkap, p.role, p.unit_kerja_id, p.created_at,
        u.id, u.nama_unit, u.kode_unit
 FROM users p
 LEFT JOIN unit_kerja u ON u.id = p.unit_kerja_id";

fn row_to_profile(row: &libsql::Row) -> Result<Profile, DatabaseError> {
    Ok(Profile {
        id: row.get::<String>(0)?,
        email: row.get::<String>(1)?,
        nama_lengkap: row.get::<String>(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        unit_kerja_id: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        unit_kerja: row_to_opt_unit(row, 6)?,
    })
}

/// Input for mirroring a newly registered identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
    pub id: String,
    pub email: String,
    pub nama_lengkap: String,
    pub role: Role,
    pub unit_kerja_id: Option<String>,
}

impl SpbeService {
    /// Insert a profile row for an identity that already exists at the provider.
    ///
    /// # Errors
    ///
    /// `DatabaseError::Validation` for an empty name or an unknown unit id;
    /// `DatabaseError::LibSql` when the id or email is already mirrored.
    pub async fn create_profile(&self, new: &NewProfile) -> Result<Profile, DatabaseError> {
        if new.nama_lengkap.trim().is_empty() {
            return Err(DatabaseError::Validation("nama_lengkap is required".into()));
        }
        if let Some(unit_id) = new.unit_kerja_id.as_deref()
            && self.get_unit(unit_id).await?.is_none()
        {
            return Err(DatabaseError::Validation(format!(
                "Unknown unit_kerja_id: {unit_id}"
            )));
        }

        let (_, created_at) = now_text();
        self.db()
            .execute(
                "INSERT INTO users (id, email, nama_lengkap, role, unit_kerja_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    new.id.as_str(),
                    new.email.as_str(),
                    new.nama_lengkap.trim(),
                    new.role.as_str(),
                    new.unit_kerja_id.as_deref(),
                    created_at.as_str()
                ],
            )
            .await?;

        tracing::info!(user_id = %new.id, role = %new.role, "profile created");
        self.get_profile(&new.id).await?.ok_or(DatabaseError::NoResult)
    }

    /// Look up a profile by user id. `None` when the identity was never mirrored.
    pub async fn get_profile(&self, id: &str) -> Result<Option<Profile>, DatabaseError> {
        let sql = format!("{SELECT_COLS} WHERE p.id = ?1");
        let mut rows = self.db().query(&sql, [id]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_profile(&row)?)),
            None => Ok(None),
        }
    }

    /// Join an authenticated identity to its organizational role record.
    ///
    /// A missing profile row is a soft failure: callers get `None` and treat
    /// the request as unauthenticated.
    pub async fn resolve_profile(
        &self,
        identity: &AuthIdentity,
    ) -> Result<Option<Profile>, DatabaseError> {
        let profile = self.get_profile(&identity.id).await?;
        if profile.is_none() {
            tracing::debug!(user_id = %identity.id, "identity has no profile row");
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{UNIT_A, seed_reference, test_service};
    use pretty_assertions::assert_eq;

    fn new_profile(id: &str, unit: Option<&str>) -> NewProfile {
        NewProfile {
            id: id.into(),
            email: format!("{id}@example.go.id"),
            nama_lengkap: "Operator Kominfo".into(),
            role: Role::OperatorUnit,
            unit_kerja_id: unit.map(String::from),
        }
    }

    #[tokio::test]
    async fn create_profile_joins_unit() {
        let svc = test_service().await;
        seed_reference(&svc).await;

        let profile = svc
            .create_profile(&new_profile("usr-op1", Some(UNIT_A)))
            .await
            .unwrap();
        assert_eq!(profile.role, Role::OperatorUnit);
        assert_eq!(profile.unit_kerja_id.as_deref(), Some(UNIT_A));
        assert_eq!(profile.unit_kerja.unwrap().kode_unit, "DISKOMINFO");
    }

    #[tokio::test]
    async fn profile_without_unit_has_no_join() {
        let svc = test_service().await;
        let profile = svc.create_profile(&new_profile("usr-x", None)).await.unwrap();
        assert!(profile.unit_kerja_id.is_none());
        assert!(profile.unit_kerja.is_none());
    }

    #[tokio::test]
    async fn unknown_unit_is_validation_error() {
        let svc = test_service().await;
        let result = svc.create_profile(&new_profile("usr-x", Some("404"))).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let svc = test_service().await;
        svc.create_profile(&new_profile("usr-x", None)).await.unwrap();
        let mut dup = new_profile("usr-y", None);
        dup.email = "usr-x@example.go.id".into();
        assert!(svc.create_profile(&dup).await.is_err());
    }

    #[tokio::test]
    async fn resolve_missing_profile_is_none() {
        let svc = test_service().await;
        let identity = AuthIdentity {
            id: "usr-ghost".into(),
            email: "ghost@example.go.id".into(),
        };
        assert!(svc.resolve_profile(&identity).await.unwrap().is_none());
    }
}
