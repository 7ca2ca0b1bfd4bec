use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::PersonRef;
use crate::enums::VerificationStatus;

/// Append-only audit record of one verification transition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VerificationLogEntry {
    pub id: String,
    pub bukti_dukung_id: String,
    pub verifikator_id: String,
    pub status_lama: VerificationStatus,
    pub status_baru: VerificationStatus,
    pub catatan: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A log entry with the acting verifier embedded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VerificationLogDetail {
    #[serde(flatten)]
    pub entry: VerificationLogEntry,
    pub verifikator: Option<PersonRef>,
}
