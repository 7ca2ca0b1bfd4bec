//! Dashboard counts.

use spbe_core::entities::Profile;
use spbe_core::enums::VerificationStatus;
use spbe_core::responses::DashboardStats;

use crate::error::DatabaseError;
use crate::service::SpbeService;

#[derive(Clone, Copy)]
enum Scope<'a> {
    All,
    /// `Unit(None)` matches nothing: `unit_kerja_id = NULL` is never true.
    Unit(Option<&'a str>),
}

impl SpbeService {
    /// Evidence counts by status.
    ///
    /// Operators see their own unit; everyone else sees global counts plus
    /// the number of units.
    pub async fn summarize(&self, actor: &Profile) -> Result<DashboardStats, DatabaseError> {
        let scope = if actor.role.is_unit_scoped() {
            Scope::Unit(actor.unit_kerja_id.as_deref())
        } else {
            Scope::All
        };

        let stats = DashboardStats {
            total: self.count_evidence(scope, None).await?,
            pending: self
                .count_evidence(scope, Some(VerificationStatus::Pending))
                .await?,
            diterima: self
                .count_evidence(scope, Some(VerificationStatus::Diterima))
                .await?,
            ditolak: self
                .count_evidence(scope, Some(VerificationStatus::Ditolak))
                .await?,
            total_units: match scope {
                Scope::All => Some(self.count_units().await?),
                Scope::Unit(_) => None,
            },
        };
        tracing::debug!(role = %actor.role, total = stats.total, "dashboard summarized");
        Ok(stats)
    }

    async fn count_evidence(
        &self,
        scope: Scope<'_>,
        status: Option<VerificationStatus>,
    ) -> Result<i64, DatabaseError> {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        if let Scope::Unit(unit) = scope {
            params.push(unit.map_or(libsql::Value::Null, Into::into));
            clauses.push(format!("unit_kerja_id = ?{}", params.len()));
        }
        if let Some(status) = status {
            params.push(status.as_str().into());
            clauses.push(format!("status_verifikasi = ?{}", params.len()));
        }
        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        self.db()
            .count(
                &format!("SELECT COUNT(*) FROM bukti_dukung{where_clause}"),
                libsql::params_from_iter(params),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{
        UNIT_A, UNIT_B, create_user, new_evidence, new_evidence_in, seed_reference, test_service,
    };
    use pretty_assertions::assert_eq;
    use spbe_core::enums::Role;

    #[tokio::test]
    async fn operator_counts_own_unit_only() {
        let svc = test_service().await;
        seed_reference(&svc).await;
        let op_a = create_user(&svc, "usr-op-a", Role::OperatorUnit, Some(UNIT_A)).await;
        let op_b = create_user(&svc, "usr-op-b", Role::OperatorUnit, Some(UNIT_B)).await;
        let verifier = create_user(&svc, "usr-ver", Role::Verifikator, None).await;

        let first = svc.create_evidence(&new_evidence("ind-1"), &op_a).await.unwrap();
        svc.create_evidence(&new_evidence("ind-2"), &op_a).await.unwrap();
        svc.create_evidence(&new_evidence_in("ind-3", UNIT_B), &op_b).await.unwrap();
        svc.transition_evidence(&first.evidence.id, "diterima", None, &verifier)
            .await
            .unwrap();

        let mine = svc.summarize(&op_a).await.unwrap();
        assert_eq!(mine.total, 2);
        assert_eq!(mine.pending, 1);
        assert_eq!(mine.diterima, 1);
        assert_eq!(mine.ditolak, 0);
        assert!(mine.total_units.is_none());

        let global = svc.summarize(&verifier).await.unwrap();
        assert_eq!(global.total, 3);
        assert_eq!(global.pending, 2);
        assert_eq!(global.total_units, Some(2));
    }

    #[tokio::test]
    async fn operator_without_unit_sees_zeros() {
        let svc = test_service().await;
        seed_reference(&svc).await;
        let op_a = create_user(&svc, "usr-op-a", Role::OperatorUnit, Some(UNIT_A)).await;
        let unitless = create_user(&svc, "usr-op-x", Role::OperatorUnit, None).await;
        svc.create_evidence(&new_evidence("ind-1"), &op_a).await.unwrap();

        let stats = svc.summarize(&unitless).await.unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.pending, 0);
    }
}
