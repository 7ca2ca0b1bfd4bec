//! Evidence (bukti dukung) CRUD.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use spbe_core::entities::{Evidence, EvidenceDetail};
use spbe_core::enums::VerificationStatus;
use spbe_core::responses::{DataResponse, MessageResponse};
use spbe_db::repos::evidence::{EvidenceFilter, NewEvidence};
use spbe_db::updates::evidence::EvidenceUpdate;

use super::non_empty;
use crate::http::extract::CurrentUser;
use crate::http::{ApiError, ApiResult, AppState};
use crate::workflow;

/// List filters. `status_verifikasi` is accepted as an alias of `status`.
#[derive(Debug, Default, Deserialize)]
pub struct EvidenceQuery {
    pub status: Option<String>,
    pub status_verifikasi: Option<String>,
    pub unit_kerja_id: Option<String>,
    pub indikator_id: Option<String>,
}

impl EvidenceQuery {
    fn into_filter(self) -> Result<EvidenceFilter, ApiError> {
        let status = non_empty(self.status)
            .or_else(|| non_empty(self.status_verifikasi))
            .map(|raw| raw.parse::<VerificationStatus>())
            .transpose()?;
        Ok(EvidenceFilter {
            status,
            unit_kerja_id: non_empty(self.unit_kerja_id),
            indikator_id: non_empty(self.indikator_id),
        })
    }
}

/// `GET /bukti-dukung`: newest first, operators see only their own unit.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Query(query): Query<EvidenceQuery>,
) -> ApiResult<Json<DataResponse<Vec<EvidenceDetail>>>> {
    let filter = query.into_filter()?;
    let evidence = state.db.list_evidence(&filter, &actor).await?;
    Ok(Json(DataResponse::new(evidence)))
}

/// `POST /bukti-dukung`.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    payload: Result<Json<NewEvidence>, JsonRejection>,
) -> ApiResult<Json<DataResponse<EvidenceDetail>>> {
    let Json(new) = payload?;
    let detail = workflow::create_evidence(&state, &new, &actor).await?;
    Ok(Json(DataResponse::new(detail)))
}

/// `PUT /bukti-dukung/{id}`: descriptive and file fields only.
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult<Json<DataResponse<Evidence>>> {
    let Json(body) = payload?;
    let (update, stripped) = EvidenceUpdate::from_payload(body)?;
    if !stripped.is_empty() {
        tracing::warn!(
            evidence_id = %id,
            user_id = %actor.id,
            fields = ?stripped,
            "ignoring protected fields in evidence update"
        );
    }
    let evidence = state.db.update_evidence(&id, &update, &actor).await?;
    Ok(Json(DataResponse::new(evidence)))
}

/// `DELETE /bukti-dukung/{id}`: removes the row, then its blob.
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    workflow::delete_evidence(&state, &id, &actor).await?;
    Ok(Json(MessageResponse::new("Bukti dukung deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_query_values_are_ignored() {
        let query = EvidenceQuery {
            status: Some(String::new()),
            unit_kerja_id: Some(" ".into()),
            indikator_id: Some("ind-1".into()),
            ..Default::default()
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(
            filter,
            EvidenceFilter {
                status: None,
                unit_kerja_id: None,
                indikator_id: Some("ind-1".into()),
            }
        );
    }

    #[test]
    fn status_alias_is_honored() {
        let query = EvidenceQuery {
            status_verifikasi: Some("perlu_revisi".into()),
            ..Default::default()
        };
        assert_eq!(
            query.into_filter().unwrap().status,
            Some(VerificationStatus::PerluRevisi)
        );
    }

    #[test]
    fn unknown_status_filter_is_rejected() {
        let query = EvidenceQuery {
            status: Some("bad_value".into()),
            ..Default::default()
        };
        let err = query.into_filter().unwrap_err();
        assert!(matches!(err, ApiError::Validation(msg) if msg == "Invalid status"));
    }
}
