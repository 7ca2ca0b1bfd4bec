use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use serde::Deserialize;
use spbe_auth::Registration;
use spbe_core::responses::{LoginResponse, MessageResponse, ProfileResponse, RegisterResponse};
use spbe_db::repos::profile::NewProfile;

use crate::http::extract::{CurrentUser, bearer_token};
use crate::http::{ApiError, ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/login`. The profile is `null` when the identity was never
/// mirrored.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let (user, session) = state
        .idp
        .authenticate(&request.email, &request.password)
        .await?;
    let profile = state.db.resolve_profile(&user).await?;
    tracing::info!(user_id = %user.id, has_profile = profile.is_some(), "login");
    Ok(Json(LoginResponse {
        user,
        session,
        profile,
    }))
}

/// `POST /auth/register`: create the identity, then mirror its profile row.
///
/// If mirroring fails the identity is discarded and the store's message is
/// returned as a 400.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> ApiResult<Json<RegisterResponse>> {
    let Json(request) = payload?;
    let role = request.validate(state.config.auth.open_role_registration)?;

    let user = state.idp.register(&request.email, &request.password).await?;
    let new = NewProfile {
        id: user.id.clone(),
        email: user.email.clone(),
        nama_lengkap: request.nama_lengkap.clone(),
        role,
        unit_kerja_id: request.unit().map(String::from),
    };

    match state.db.create_profile(&new).await {
        Ok(profile) => Ok(Json(RegisterResponse { user, profile })),
        Err(error) => {
            if let Err(discard_error) = state.idp.discard_identity(&user).await {
                tracing::warn!(
                    user_id = %user.id,
                    error = %discard_error,
                    "failed to discard identity after profile error"
                );
            }
            Err(ApiError::validation(error.to_string()))
        }
    }
}

/// `GET /auth/profile`.
pub async fn profile(CurrentUser(profile): CurrentUser) -> Json<ProfileResponse> {
    Json(ProfileResponse { profile })
}

/// `POST /auth/logout`. Ends the presented session, if any.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<MessageResponse>> {
    if let Some(token) = bearer_token(&headers) {
        state
            .idp
            .end_session(token)
            .await
            .map_err(|e| ApiError::validation(e.to_string()))?;
    }
    Ok(Json(MessageResponse::new("Logged out successfully")))
}
