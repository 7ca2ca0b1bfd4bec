//! Evidence (bukti dukung) repository: create, list, edit and delete.
//!
//! Status and verifier fields are never written here; see
//! [`crate::repos::verification`] for the transition path.

use serde::{Deserialize, Serialize};
use spbe_core::blob::is_within_unit;
use spbe_core::entities::{Evidence, EvidenceDetail, IndicatorDetail, PersonRef, Profile};
use spbe_core::enums::{Role, VerificationStatus};
use spbe_core::ids::PREFIX_EVIDENCE;

use crate::error::DatabaseError;
use crate::helpers::{
    get_opt_i64, get_opt_string, now_text, parse_datetime, parse_enum, parse_optional_datetime,
};
use crate::repos::indicator::row_to_indicator;
use crate::repos::taxonomy::row_to_opt_aspect_detail;
use crate::repos::unit::row_to_opt_unit;
use crate::service::SpbeService;
use crate::updates::evidence::EvidenceUpdate;

const EVIDENCE_COLS: &str = "id, indikator_id, unit_kerja_id, uploaded_by, nama_file, file_path,
        file_size, file_type, deskripsi, tahun_data, status_verifikasi, catatan_verifikasi,
        verified_by, verified_at, created_at, updated_at";

/// Evidence (0-15), indicator (16-22), aspect + domain (23-30), unit (31-33),
/// uploader (34-35), verifier (36-37).
const DETAIL_SELECT: &str = "SELECT b.id, b.indikator_id, b.unit_kerja_id, b.uploaded_by, b.nama_file, b.file_path,
        b.file_size, b.file_type, b.deskripsi, b.tahun_data, b.status_verifikasi, b.catatan_verifikasi,
        b.verified_by, b.verified_at, b.created_at, b.updated_at,
        i.id, i.aspek_id, i.unit_kerja_id, i.kode_indikator, i.nama_indikator, i.deskripsi, i.urutan,
        a.id, a.domain_id, a.nama_aspek, a.urutan,
        d.id, d.nama_domain, d.deskripsi, d.urutan,
        u.id, u.nama_unit, u.kode_unit,
        up.nama_lengkap, up.email,
        vf.nama_lengkap, vf.email
 FROM bukti_dukung b
 LEFT JOIN indikator_spbe i ON i.id = b.indikator_id
 LEFT JOIN aspek_spbe a ON a.id = i.aspek_id
 LEFT JOIN domain_spbe d ON d.id = a.domain_id
 LEFT JOIN unit_kerja u ON u.id = b.unit_kerja_id
 LEFT JOIN users up ON up.id = b.uploaded_by
 LEFT JOIN users vf ON vf.id = b.verified_by";

pub const FORBIDDEN_SUBMIT: &str = "Forbidden: Only operator_unit or super_admin can manage evidence";
pub const FORBIDDEN_OTHER_UNIT: &str = "Forbidden: evidence belongs to another unit";

pub(crate) fn row_to_evidence(row: &libsql::Row, offset: i32) -> Result<Evidence, DatabaseError> {
    let verified_at = get_opt_string(row, offset + 13)?;
    Ok(Evidence {
        id: row.get::<String>(offset)?,
        indikator_id: row.get::<String>(offset + 1)?,
        unit_kerja_id: row.get::<String>(offset + 2)?,
        uploaded_by: row.get::<String>(offset + 3)?,
        nama_file: row.get::<String>(offset + 4)?,
        file_path: row.get::<String>(offset + 5)?,
        file_size: get_opt_i64(row, offset + 6)?,
        file_type: get_opt_string(row, offset + 7)?,
        deskripsi: get_opt_string(row, offset + 8)?,
        tahun_data: get_opt_i64(row, offset + 9)?,
        status_verifikasi: parse_enum(&row.get::<String>(offset + 10)?)?,
        catatan_verifikasi: get_opt_string(row, offset + 11)?,
        verified_by: get_opt_string(row, offset + 12)?,
        verified_at: parse_optional_datetime(verified_at.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(offset + 14)?)?,
        updated_at: parse_datetime(&row.get::<String>(offset + 15)?)?,
    })
}

fn row_to_person(row: &libsql::Row, offset: i32) -> Result<Option<PersonRef>, DatabaseError> {
    let Some(nama_lengkap) = get_opt_string(row, offset)? else {
        return Ok(None);
    };
    Ok(Some(PersonRef {
        nama_lengkap,
        email: row.get::<Option<String>>(offset + 1)?.unwrap_or_default(),
    }))
}

pub(crate) fn row_to_evidence_detail(row: &libsql::Row) -> Result<EvidenceDetail, DatabaseError> {
    let indikator = if row.get::<Option<String>>(16)?.is_some() {
        Some(IndicatorDetail {
            indicator: row_to_indicator(row, 16)?,
            aspek: row_to_opt_aspect_detail(row, 23)?,
            unit_kerja: None,
        })
    } else {
        None
    };
    Ok(EvidenceDetail {
        evidence: row_to_evidence(row, 0)?,
        indikator,
        unit_kerja: row_to_opt_unit(row, 31)?,
        uploader: row_to_person(row, 34)?,
        verifikator: row_to_person(row, 36)?,
    })
}

/// Optional filters for [`SpbeService::list_evidence`]. All are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceFilter {
    pub status: Option<VerificationStatus>,
    pub unit_kerja_id: Option<String>,
    pub indikator_id: Option<String>,
}

/// Create payload. Any status the client sends is ignored by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewEvidence {
    pub indikator_id: Option<String>,
    pub nama_file: Option<String>,
    pub file_path: Option<String>,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
    pub deskripsi: Option<String>,
    pub tahun_data: Option<i64>,
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, DatabaseError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DatabaseError::Validation(format!("{field} is required")))
}

fn actor_unit(actor: &Profile) -> Result<&str, DatabaseError> {
    actor
        .unit_kerja_id
        .as_deref()
        .ok_or_else(|| DatabaseError::Validation("User has no unit_kerja".into()))
}

/// Operators may only reference blobs stored under their own unit.
fn ensure_path_in_unit(actor: &Profile, file_path: &str) -> Result<(), DatabaseError> {
    let Some(unit) = actor.unit_kerja_id.as_deref().filter(|_| actor.role.is_unit_scoped()) else {
        return Ok(());
    };
    if is_within_unit(file_path, unit) {
        Ok(())
    } else {
        Err(DatabaseError::Validation(format!(
            "file_path must be stored under unit {unit}"
        )))
    }
}

/// Operators may touch their own unit's evidence; super admins any.
fn ensure_can_modify(actor: &Profile, evidence: &Evidence) -> Result<(), DatabaseError> {
    match actor.role {
        Role::SuperAdmin => Ok(()),
        Role::OperatorUnit if actor.owns_unit(&evidence.unit_kerja_id) => Ok(()),
        Role::OperatorUnit => Err(DatabaseError::Forbidden(FORBIDDEN_OTHER_UNIT.into())),
        Role::Verifikator => Err(DatabaseError::Forbidden(FORBIDDEN_SUBMIT.into())),
    }
}

impl SpbeService {
    /// List evidence with joined context, newest first.
    ///
    /// Operators only ever see their own unit. An operator without a unit
    /// sees nothing.
    pub async fn list_evidence(
        &self,
        filter: &EvidenceFilter,
        actor: &Profile,
    ) -> Result<Vec<EvidenceDetail>, DatabaseError> {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if actor.role.is_unit_scoped() {
            let Some(unit) = actor.unit_kerja_id.as_deref() else {
                return Ok(Vec::new());
            };
            params.push(unit.into());
            clauses.push(format!("b.unit_kerja_id = ?{}", params.len()));
        }
        if let Some(unit) = filter.unit_kerja_id.as_deref() {
            params.push(unit.into());
            clauses.push(format!("b.unit_kerja_id = ?{}", params.len()));
        }
        if let Some(status) = filter.status {
            params.push(status.as_str().into());
            clauses.push(format!("b.status_verifikasi = ?{}", params.len()));
        }
        if let Some(indicator) = filter.indikator_id.as_deref() {
            params.push(indicator.into());
            clauses.push(format!("b.indikator_id = ?{}", params.len()));
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        let sql = format!("{DETAIL_SELECT}{where_clause} ORDER BY b.created_at DESC, b.rowid DESC");

        let mut rows = self
            .db()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut evidence = Vec::new();
        while let Some(row) = rows.next().await? {
            evidence.push(row_to_evidence_detail(&row)?);
        }
        Ok(evidence)
    }

    /// Fetch a bare evidence row. `None` when absent.
    pub async fn find_evidence(&self, id: &str) -> Result<Option<Evidence>, DatabaseError> {
        let sql = format!("SELECT {EVIDENCE_COLS} FROM bukti_dukung WHERE id = ?1");
        let mut rows = self.db().query(&sql, [id]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_evidence(&row, 0)?)),
            None => Ok(None),
        }
    }

    /// Fetch a bare evidence row.
    ///
    /// # Errors
    ///
    /// `DatabaseError::NoResult` when the id does not exist.
    pub async fn get_evidence(&self, id: &str) -> Result<Evidence, DatabaseError> {
        self.find_evidence(id).await?.ok_or(DatabaseError::NoResult)
    }

    /// Whether any evidence row still points at `file_path`.
    pub async fn blob_in_use(&self, file_path: &str) -> Result<bool, DatabaseError> {
        let count = self
            .db()
            .count(
                "SELECT COUNT(*) FROM bukti_dukung WHERE file_path = ?1",
                [file_path],
            )
            .await?;
        Ok(count > 0)
    }

    /// Fetch an evidence row with indicator, unit, uploader and verifier.
    pub async fn get_evidence_detail(&self, id: &str) -> Result<EvidenceDetail, DatabaseError> {
        let sql = format!("{DETAIL_SELECT} WHERE b.id = ?1");
        let mut rows = self.db().query(&sql, [id]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_evidence_detail(&row)
    }

    /// Record new evidence for the actor's unit.
    ///
    /// The unit and uploader come from `actor`, never from the payload, and
    /// the record always starts `pending`.
    ///
    /// # Errors
    ///
    /// `Forbidden` for verifikators; `Validation` for missing fields, an
    /// actor without a unit, an operator's `file_path` outside their unit,
    /// or an unknown indicator.
    pub async fn create_evidence(
        &self,
        new: &NewEvidence,
        actor: &Profile,
    ) -> Result<EvidenceDetail, DatabaseError> {
        if !actor.role.can_submit_evidence() {
            return Err(DatabaseError::Forbidden(FORBIDDEN_SUBMIT.into()));
        }
        let indikator_id = required(new.indikator_id.as_deref(), "indikator_id")?;
        let nama_file = required(new.nama_file.as_deref(), "nama_file")?;
        let file_path = required(new.file_path.as_deref(), "file_path")?;
        let unit = actor_unit(actor)?;
        ensure_path_in_unit(actor, file_path)?;
        if !self.indicator_exists(indikator_id).await? {
            return Err(DatabaseError::Validation(format!(
                "Unknown indikator_id: {indikator_id}"
            )));
        }

        let id = self.db().generate_id(PREFIX_EVIDENCE).await?;
        let (_, now) = now_text();
        self.db()
            .execute(
                "INSERT INTO bukti_dukung (id, indikator_id, unit_kerja_id, uploaded_by, nama_file, file_path,
                     file_size, file_type, deskripsi, tahun_data, status_verifikasi, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
                libsql::params![
                    id.as_str(),
                    indikator_id,
                    unit,
                    actor.id.as_str(),
                    nama_file,
                    file_path,
                    new.file_size,
                    new.file_type.as_deref(),
                    new.deskripsi.as_deref(),
                    new.tahun_data,
                    VerificationStatus::Pending.as_str(),
                    now.as_str()
                ],
            )
            .await?;

        tracing::info!(evidence_id = %id, unit = unit, indikator_id, "evidence created");
        self.get_evidence_detail(&id).await
    }

    /// Apply an edit to the descriptive fields of an evidence record.
    ///
    /// # Errors
    ///
    /// `Forbidden` when the actor may not touch the record; `Validation` when
    /// the record is `diterima` or `ditolak`, or when an operator points
    /// `file_path` outside their unit; `NoResult` when it does not exist.
    pub async fn update_evidence(
        &self,
        id: &str,
        update: &EvidenceUpdate,
        actor: &Profile,
    ) -> Result<Evidence, DatabaseError> {
        if !actor.role.can_submit_evidence() {
            return Err(DatabaseError::Forbidden(FORBIDDEN_SUBMIT.into()));
        }
        let current = self.get_evidence(id).await?;
        ensure_can_modify(actor, &current)?;
        if !current.status_verifikasi.is_editable() {
            return Err(DatabaseError::Validation(format!(
                "Evidence {id} is {} and can no longer be edited",
                current.status_verifikasi
            )));
        }
        if update.is_empty() {
            return Ok(current);
        }
        if let Some(file_path) = update.file_path.as_deref() {
            ensure_path_in_unit(actor, file_path)?;
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(deskripsi) = &update.deskripsi {
            params.push(deskripsi.clone().map_or(libsql::Value::Null, Into::into));
            sets.push(format!("deskripsi = ?{}", params.len()));
        }
        if let Some(tahun_data) = update.tahun_data {
            params.push(tahun_data.into());
            sets.push(format!("tahun_data = ?{}", params.len()));
        }
        if let Some(nama_file) = &update.nama_file {
            params.push(nama_file.clone().into());
            sets.push(format!("nama_file = ?{}", params.len()));
        }
        if let Some(file_path) = &update.file_path {
            params.push(file_path.clone().into());
            sets.push(format!("file_path = ?{}", params.len()));
        }
        if let Some(file_size) = update.file_size {
            params.push(file_size.into());
            sets.push(format!("file_size = ?{}", params.len()));
        }
        if let Some(file_type) = &update.file_type {
            params.push(file_type.clone().into());
            sets.push(format!("file_type = ?{}", params.len()));
        }

        let (_, now) = now_text();
        params.push(now.into());
        sets.push(format!("updated_at = ?{}", params.len()));
        params.push(id.into());
        let sql = format!(
            "UPDATE bukti_dukung SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );

        self.db()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        tracing::debug!(evidence_id = %id, "evidence updated");
        self.get_evidence(id).await
    }

    /// Remove an evidence record and return it so the caller can release its
    /// blob. Deleting an id that does not exist succeeds with `None`.
    ///
    /// The verification log is left in place.
    pub async fn delete_evidence(
        &self,
        id: &str,
        actor: &Profile,
    ) -> Result<Option<Evidence>, DatabaseError> {
        if !actor.role.can_submit_evidence() {
            return Err(DatabaseError::Forbidden(FORBIDDEN_SUBMIT.into()));
        }
        let Some(current) = self.find_evidence(id).await? else {
            tracing::debug!(evidence_id = %id, "delete of absent evidence");
            return Ok(None);
        };
        ensure_can_modify(actor, &current)?;

        self.db()
            .execute("DELETE FROM bukti_dukung WHERE id = ?1", [id])
            .await?;
        tracing::info!(evidence_id = %id, file_path = %current.file_path, "evidence deleted");
        Ok(Some(current))
    }
}
