//! Verification transitions and the append-only verification log.

use spbe_core::entities::{EvidenceDetail, PersonRef, Profile, VerificationLogDetail, VerificationLogEntry};
use spbe_core::enums::VerificationStatus;
use spbe_core::ids::PREFIX_VERIFICATION_LOG;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, now_text, parse_datetime, parse_enum};
use crate::service::SpbeService;

pub const FORBIDDEN_VERIFY: &str = "Forbidden: Only verifikator can verify";

fn row_to_log_detail(row: &libsql::Row) -> Result<VerificationLogDetail, DatabaseError> {
    let verifikator = match get_opt_string(row, 7)? {
        Some(nama_lengkap) => Some(PersonRef {
            nama_lengkap,
            email: get_opt_string(row, 8)?.unwrap_or_default(),
        }),
        None => None,
    };
    Ok(VerificationLogDetail {
        entry: VerificationLogEntry {
            id: row.get::<String>(0)?,
            bukti_dukung_id: row.get::<String>(1)?,
            verifikator_id: row.get::<String>(2)?,
            status_lama: parse_enum(&row.get::<String>(3)?)?,
            status_baru: parse_enum(&row.get::<String>(4)?)?,
            catatan: get_opt_string(row, 5)?,
            created_at: parse_datetime(&row.get::<String>(6)?)?,
        },
        verifikator,
    })
}

impl SpbeService {
    /// Apply a verification verdict.
    ///
    /// Checks the actor's role and the status value, then reads the current
    /// status, updates the record and appends the log entry in one
    /// transaction. Any status may be set from any status.
    ///
    /// # Errors
    ///
    /// `Forbidden` for operators; `Validation("Invalid status")` for an
    /// unknown status; `NoResult` for an unknown id.
    pub async fn transition_evidence(
        &self,
        id: &str,
        status: &str,
        note: Option<&str>,
        actor: &Profile,
    ) -> Result<EvidenceDetail, DatabaseError> {
        if !actor.role.can_verify() {
            return Err(DatabaseError::Forbidden(FORBIDDEN_VERIFY.into()));
        }
        let next: VerificationStatus = status.parse()?;

        let log_id = self.db().generate_id(PREFIX_VERIFICATION_LOG).await?;
        let (_, now) = now_text();

        let tx = self.db().begin().await?;
        let mut rows = tx
            .query("SELECT status_verifikasi FROM bukti_dukung WHERE id = ?1", [id])
            .await?;
        let from: VerificationStatus = match rows.next().await? {
            Some(row) => parse_enum(&row.get::<String>(0)?)?,
            None => return Err(DatabaseError::NoResult),
        };
        drop(rows);

        tx.execute(
            "UPDATE bukti_dukung
             SET status_verifikasi = ?1, catatan_verifikasi = ?2, verified_by = ?3,
                 verified_at = ?4, updated_at = ?4
             WHERE id = ?5",
            libsql::params![next.as_str(), note, actor.id.as_str(), now.as_str(), id],
        )
        .await?;
        tx.execute(
            "INSERT INTO verifikasi_log (id, bukti_dukung_id, verifikator_id, status_lama, status_baru, catatan, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            libsql::params![
                log_id.as_str(),
                id,
                actor.id.as_str(),
                from.as_str(),
                next.as_str(),
                note,
                now.as_str()
            ],
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            evidence_id = %id,
            verifikator = %actor.id,
            from = %from,
            to = %next,
            "evidence verified"
        );
        self.get_evidence_detail(id).await
    }

    /// Verification history of one evidence record, newest first.
    ///
    /// Entries outlive the evidence they describe.
    pub async fn list_verification_log(
        &self,
        evidence_id: &str,
    ) -> Result<Vec<VerificationLogDetail>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT l.id, l.bukti_dukung_id, l.verifikator_id, l.status_lama, l.status_baru,
                        l.catatan, l.created_at, v.nama_lengkap, v.email
                 FROM verifikasi_log l
                 LEFT JOIN users v ON v.id = l.verifikator_id
                 WHERE l.bukti_dukung_id = ?1
                 ORDER BY l.created_at DESC, l.rowid DESC",
                [evidence_id],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_log_detail(&row)?);
        }
        Ok(entries)
    }
}
