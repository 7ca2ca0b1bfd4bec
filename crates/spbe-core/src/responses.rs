//! HTTP response types returned as JSON by `spbe-server`.
//!
//! These structs define the shape of every response body, including the
//! `{ "error": ... }` body used for all failures.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Profile;
use crate::identity::{AuthIdentity, AuthSession};

/// `{ "data": [...] }` or `{ "data": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub const fn new(data: T) -> Self {
        Self { data }
    }
}

/// Response from `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LoginResponse {
    pub user: AuthIdentity,
    pub session: AuthSession,
    pub profile: Option<Profile>,
}

/// Response from `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RegisterResponse {
    pub user: AuthIdentity,
    pub profile: Profile,
}

/// Response from `GET /auth/profile`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProfileResponse {
    pub profile: Profile,
}

/// `{ "message": ... }` for logout and deletions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Role-scoped evidence counts.
///
/// `total_units` is only present for verifier and admin roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: i64,
    pub pending: i64,
    pub diterima: i64,
    pub ditolak: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_units: Option<i64>,
}

/// Response from `GET /dashboard/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatsResponse {
    pub stats: DashboardStats,
}

/// Response from `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UploadResponse {
    pub file_path: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// Response from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}
