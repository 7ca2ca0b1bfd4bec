//! Read-only reference data. No authentication required.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use spbe_core::entities::{AspectDetail, Domain, IndicatorDetail, Unit};
use spbe_core::responses::DataResponse;

use super::non_empty;
use crate::http::{ApiResult, AppState};

pub async fn units(State(state): State<AppState>) -> ApiResult<Json<DataResponse<Vec<Unit>>>> {
    Ok(Json(DataResponse::new(state.db.list_units().await?)))
}

pub async fn domains(
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<Vec<Domain>>>> {
    Ok(Json(DataResponse::new(state.db.list_domains().await?)))
}

pub async fn aspects(
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<Vec<AspectDetail>>>> {
    Ok(Json(DataResponse::new(state.db.list_aspects().await?)))
}

#[derive(Debug, Default, Deserialize)]
pub struct IndicatorQuery {
    pub unit_kerja_id: Option<String>,
}

pub async fn indicators(
    State(state): State<AppState>,
    Query(query): Query<IndicatorQuery>,
) -> ApiResult<Json<DataResponse<Vec<IndicatorDetail>>>> {
    let unit = non_empty(query.unit_kerja_id);
    let indicators = state.db.list_indicators(unit.as_deref()).await?;
    Ok(Json(DataResponse::new(indicators)))
}
