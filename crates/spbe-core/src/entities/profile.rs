use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Unit;
use crate::enums::Role;

/// Local mirror of an identity-provider user, carrying the organizational role.
///
/// `id` is the identity provider's user id. `unit_kerja` is the joined unit
/// row and is `None` when the user has no unit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub nama_lengkap: String,
    pub role: Role,
    pub unit_kerja_id: Option<String>,
    pub unit_kerja: Option<Unit>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Whether this user owns evidence belonging to `unit_id`.
    #[must_use]
    pub fn owns_unit(&self, unit_id: &str) -> bool {
        self.unit_kerja_id.as_deref() == Some(unit_id)
    }
}
