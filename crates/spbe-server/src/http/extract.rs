use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use spbe_core::entities::Profile;

use super::{ApiError, AppState};

/// Bearer token from the `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The acting user's profile, resolved from the bearer token on every request.
///
/// Rejects with 401 when the token is missing or unknown, or when the
/// identity has no profile row.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Profile);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(ApiError::unauthorized)?;
        let identity = state
            .idp
            .resolve_token(token)
            .await?
            .ok_or_else(ApiError::unauthorized)?;
        let profile = state
            .db
            .resolve_profile(&identity)
            .await?
            .ok_or_else(ApiError::unauthorized)?;
        Ok(Self(profile))
    }
}
