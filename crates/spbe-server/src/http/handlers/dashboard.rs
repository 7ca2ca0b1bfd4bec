use axum::Json;
use axum::extract::State;
use spbe_core::responses::StatsResponse;

use crate::http::extract::CurrentUser;
use crate::http::{ApiResult, AppState};

/// `GET /dashboard/stats`: counts scoped by the actor's role.
pub async fn stats(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> ApiResult<Json<StatsResponse>> {
    let stats = state.db.summarize(&actor).await?;
    Ok(Json(StatsResponse { stats }))
}
