//! Multipart file upload into the evidence bucket.

use axum::Json;
use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartRejection};
use chrono::Utc;
use spbe_core::blob::{evidence_blob_path, sanitize_file_name};
use spbe_core::entities::Profile;
use spbe_core::responses::UploadResponse;
use spbe_db::repos::evidence::FORBIDDEN_SUBMIT;

use super::non_empty;
use crate::http::extract::CurrentUser;
use crate::http::{ApiError, ApiResult, AppState};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

struct UploadedFile {
    name: String,
    content_type: String,
    data: Vec<u8>,
}

/// The actor's own unit wins; the form value only covers unit-less users.
fn upload_unit(actor: &Profile, form_unit: Option<String>) -> Result<String, ApiError> {
    actor
        .unit_kerja_id
        .clone()
        .or_else(|| non_empty(form_unit))
        .ok_or_else(|| ApiError::validation("User has no unit_kerja"))
}

/// `POST /upload` with fields `file` and optional `unit_kerja_id`.
pub async fn upload(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    if !actor.role.can_submit_evidence() {
        return Err(ApiError::Forbidden(FORBIDDEN_SUBMIT.into()));
    }

    let mut multipart = multipart?;
    let mut file = None;
    let mut form_unit = None;
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or("file").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let data = field.bytes().await?.to_vec();
                file = Some(UploadedFile {
                    name,
                    content_type,
                    data,
                });
            }
            Some("unit_kerja_id") => form_unit = Some(field.text().await?),
            _ => {}
        }
    }

    let file = file.ok_or_else(|| ApiError::validation("No file provided"))?;
    let unit = upload_unit(&actor, form_unit)?;
    let file_name = sanitize_file_name(&file.name);
    let file_path = evidence_blob_path(&unit, Utc::now().timestamp_millis(), &file.name);
    let file_size = i64::try_from(file.data.len())
        .map_err(|_| ApiError::validation("File is too large"))?;

    state
        .blobs
        .put(&file_path, file.data, &file.content_type)
        .await?;
    tracing::info!(
        user_id = %actor.id,
        file_path = %file_path,
        file_size,
        "evidence file uploaded"
    );

    Ok(Json(UploadResponse {
        file_path,
        file_name,
        file_size,
        file_type: file.content_type,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spbe_core::enums::Role;

    fn actor(unit: Option<&str>) -> Profile {
        Profile {
            id: "usr-1".into(),
            email: "op@example.go.id".into(),
            nama_lengkap: "Operator".into(),
            role: Role::OperatorUnit,
            unit_kerja_id: unit.map(String::from),
            unit_kerja: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn own_unit_overrides_form_value() {
        let unit = upload_unit(&actor(Some("5")), Some("7".into())).unwrap();
        assert_eq!(unit, "5");
    }

    #[test]
    fn form_value_covers_unitless_user() {
        let unit = upload_unit(&actor(None), Some("7".into())).unwrap();
        assert_eq!(unit, "7");
        assert!(upload_unit(&actor(None), Some(String::new())).is_err());
        assert!(upload_unit(&actor(None), None).is_err());
    }
}
