//! Evidence update payload and builder.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DatabaseError;

/// Keys that an update payload may carry but that this path never writes.
///
/// Status and verifier fields belong to the verification transition; unit,
/// uploader and indicator are fixed at creation.
pub const PROTECTED_FIELDS: &[&str] = &[
    "id",
    "indikator_id",
    "unit_kerja_id",
    "uploaded_by",
    "status_verifikasi",
    "catatan_verifikasi",
    "verified_by",
    "verified_at",
    "created_at",
    "updated_at",
];

/// Absent stays `None`; an explicit `null` becomes `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The mutable fields of an evidence record. Every other key is rejected.
///
/// `deskripsi` is nullable: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvidenceUpdate {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tahun_data: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

impl EvidenceUpdate {
    /// Parse a loosely-typed JSON body.
    ///
    /// Protected keys are stripped and returned so the caller can log them.
    ///
    /// # Errors
    ///
    /// `DatabaseError::Validation` if the body is not an object, carries an
    /// unknown key, or a field has the wrong type.
    pub fn from_payload(payload: serde_json::Value) -> Result<(Self, Vec<String>), DatabaseError> {
        let serde_json::Value::Object(mut map) = payload else {
            return Err(DatabaseError::Validation(
                "Update payload must be a JSON object".into(),
            ));
        };

        let stripped: Vec<String> = PROTECTED_FIELDS
            .iter()
            .filter(|key| map.remove(**key).is_some())
            .map(|key| (*key).to_string())
            .collect();

        let update: Self = serde_json::from_value(serde_json::Value::Object(map))
            .map_err(|e| DatabaseError::Validation(format!("Invalid update payload: {e}")))?;
        update.validate()?;
        Ok((update, stripped))
    }

    fn validate(&self) -> Result<(), DatabaseError> {
        if self.nama_file.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(DatabaseError::Validation("nama_file cannot be empty".into()));
        }
        if self.file_path.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(DatabaseError::Validation("file_path cannot be empty".into()));
        }
        Ok(())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.deskripsi.is_none()
            && self.tahun_data.is_none()
            && self.nama_file.is_none()
            && self.file_path.is_none()
            && self.file_size.is_none()
            && self.file_type.is_none()
    }
}

pub struct EvidenceUpdateBuilder(EvidenceUpdate);

impl EvidenceUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(EvidenceUpdate::default())
    }

    #[must_use]
    pub fn deskripsi(mut self, val: impl Into<String>) -> Self {
        self.0.deskripsi = Some(Some(val.into()));
        self
    }

    #[must_use]
    pub fn clear_deskripsi(mut self) -> Self {
        self.0.deskripsi = Some(None);
        self
    }

    #[must_use]
    pub const fn tahun_data(mut self, val: i64) -> Self {
        self.0.tahun_data = Some(val);
        self
    }

    #[must_use]
    pub fn file(
        mut self,
        nama_file: impl Into<String>,
        file_path: impl Into<String>,
        file_size: i64,
        file_type: impl Into<String>,
    ) -> Self {
        self.0.nama_file = Some(nama_file.into());
        self.0.file_path = Some(file_path.into());
        self.0.file_size = Some(file_size);
        self.0.file_type = Some(file_type.into());
        self
    }

    #[must_use]
    pub fn build(self) -> EvidenceUpdate {
        self.0
    }
}

impl Default for EvidenceUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
