//! Roles and verification statuses.
//!
//! Both enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! matching the values stored in SQL and sent over the wire.
//! `VerificationStatus` carries the edit rule (`is_editable`); verdicts
//! themselves may be re-applied from any status.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Organizational role of a user. Fixed at registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    OperatorUnit,
    Verifikator,
    SuperAdmin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OperatorUnit => "operator_unit",
            Self::Verifikator => "verifikator",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Whether this role may apply verification transitions.
    #[must_use]
    pub const fn can_verify(self) -> bool {
        match self {
            Self::Verifikator | Self::SuperAdmin => true,
            Self::OperatorUnit => false,
        }
    }

    /// Whether this role may upload, create, edit and delete evidence.
    #[must_use]
    pub const fn can_submit_evidence(self) -> bool {
        match self {
            Self::OperatorUnit | Self::SuperAdmin => true,
            Self::Verifikator => false,
        }
    }

    /// Whether evidence reads and edits are confined to the user's own unit.
    #[must_use]
    pub const fn is_unit_scoped(self) -> bool {
        match self {
            Self::OperatorUnit => true,
            Self::Verifikator | Self::SuperAdmin => false,
        }
    }

    /// Whether a user may pick this role for themselves at registration
    /// without `auth.open_role_registration`.
    #[must_use]
    pub const fn is_self_assignable(self) -> bool {
        match self {
            Self::OperatorUnit => true,
            Self::Verifikator | Self::SuperAdmin => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operator_unit" => Ok(Self::OperatorUnit),
            "verifikator" => Ok(Self::Verifikator),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(CoreError::Validation(format!("Invalid role: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// VerificationStatus
// ---------------------------------------------------------------------------

/// Verification status of an evidence record.
///
/// ```text
/// any status → pending | diterima | ditolak | perlu_revisi
/// ```
///
/// A verifier may set any status from any status, so revised evidence is
/// re-verified in place and a mistaken verdict can be corrected. Each change
/// is recorded in the verification log with its old and new status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Diterima,
    Ditolak,
    PerluRevisi,
}

impl VerificationStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Diterima, Self::Ditolak, Self::PerluRevisi];

    /// Whether the descriptive fields of evidence in this state may still be edited.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        match self {
            Self::Pending | Self::PerluRevisi => true,
            Self::Diterima | Self::Ditolak => false,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Diterima => "diterima",
            Self::Ditolak => "ditolak",
            Self::PerluRevisi => "perlu_revisi",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation("Invalid status".into()))
    }
}
