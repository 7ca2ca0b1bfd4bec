//! API error type and its conversions from every crate error.
//!
//! Unexpected failures surface as 500 with the underlying message as-is.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use spbe_auth::AuthError;
use spbe_core::errors::CoreError;
use spbe_core::responses::ErrorBody;
use spbe_db::error::DatabaseError;
use spbe_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized".into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Forbidden(msg) => Self::Forbidden(msg),
            DatabaseError::Validation(msg) => Self::Validation(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Unauthorized | AuthError::InvalidCredentials => {
                Self::Unauthorized(error.to_string())
            }
            AuthError::AlreadyRegistered => Self::Validation(error.to_string()),
            AuthError::Forbidden(msg) => Self::Forbidden(msg),
            AuthError::Validation(msg) => Self::Validation(msg),
            AuthError::Database(inner) => inner.into(),
            AuthError::Provider(_) | AuthError::Hashing(_) => Self::Internal(error.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::InvalidPath { .. } => Self::Validation(error.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        Self::Validation(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn workflow_errors_map_to_their_status() {
        let cases = [
            (
                ApiError::from(DatabaseError::Forbidden("Forbidden: Only verifikator can verify".into())),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::from(DatabaseError::Validation("Invalid status".into())),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::from(DatabaseError::NoResult), StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::from(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (ApiError::from(AuthError::AlreadyRegistered), StatusCode::BAD_REQUEST),
            (
                ApiError::from(AuthError::Database(DatabaseError::Validation("x".into()))),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(StorageError::Configuration("offline".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.status(), status, "{error}");
        }
    }

    #[test]
    fn internal_errors_keep_the_raw_message() {
        let error = ApiError::from(DatabaseError::NoResult);
        assert_eq!(error.to_string(), "No result returned");
    }
}
