use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{IndicatorDetail, Unit};
use crate::enums::VerificationStatus;

/// A submitted document supporting compliance with an indicator (bukti dukung).
///
/// `unit_kerja_id` and `uploaded_by` are fixed at creation. The `verified_*`
/// fields and `catatan_verifikasi` change only through a verification transition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Evidence {
    pub id: String,
    pub indikator_id: String,
    pub unit_kerja_id: String,
    pub uploaded_by: String,
    pub nama_file: String,
    pub file_path: String,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
    pub deskripsi: Option<String>,
    pub tahun_data: Option<i64>,
    pub status_verifikasi: VerificationStatus,
    pub catatan_verifikasi: Option<String>,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Name and email of a user referenced by evidence or a log entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PersonRef {
    pub nama_lengkap: String,
    pub email: String,
}

/// Evidence with its indicator, unit, uploader and verifier embedded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvidenceDetail {
    #[serde(flatten)]
    pub evidence: Evidence,
    pub indikator: Option<IndicatorDetail>,
    pub unit_kerja: Option<Unit>,
    pub uploader: Option<PersonRef>,
    pub verifikator: Option<PersonRef>,
}
