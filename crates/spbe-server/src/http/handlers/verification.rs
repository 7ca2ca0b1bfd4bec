use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::Deserialize;
use spbe_core::entities::{EvidenceDetail, VerificationLogDetail};
use spbe_core::responses::DataResponse;

use crate::http::extract::CurrentUser;
use crate::http::{ApiResult, AppState};

/// Body of `PUT /verifikasi/{id}`. The status stays a raw string so an
/// unknown value reaches the status parser and fails as "Invalid status".
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyRequest {
    pub status_verifikasi: String,
    pub catatan_verifikasi: Option<String>,
}

pub async fn verify(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> ApiResult<Json<DataResponse<EvidenceDetail>>> {
    let Json(request) = payload?;
    let detail = state
        .db
        .transition_evidence(
            &id,
            &request.status_verifikasi,
            request.catatan_verifikasi.as_deref(),
            &actor,
        )
        .await?;
    Ok(Json(DataResponse::new(detail)))
}

/// `GET /verifikasi-log/{bukti_id}`: newest first. Entries outlive their
/// evidence.
pub async fn log(
    State(state): State<AppState>,
    Path(bukti_id): Path<String>,
) -> ApiResult<Json<DataResponse<Vec<VerificationLogDetail>>>> {
    let entries = state.db.list_verification_log(&bukti_id).await?;
    Ok(Json(DataResponse::new(entries)))
}
