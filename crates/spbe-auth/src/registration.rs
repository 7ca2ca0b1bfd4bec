//! Registration request and its checks, run before any identity is created.

use serde::{Deserialize, Serialize};
use spbe_core::enums::Role;

use crate::error::AuthError;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub nama_lengkap: String,
    /// Raw role string; parsed by [`Registration::validate`].
    pub role: Option<String>,
    pub unit_kerja_id: Option<String>,
}

impl Registration {
    /// Check the request shape and resolve the role.
    ///
    /// Without `open_role_registration` only `operator_unit` may be
    /// self-assigned.
    ///
    /// # Errors
    ///
    /// `AuthError::Validation` for a malformed email, short password, empty
    /// name or unknown role; `AuthError::Forbidden` for a privileged role.
    pub fn validate(&self, open_role_registration: bool) -> Result<Role, AuthError> {
        if !self.email.contains('@') {
            return Err(AuthError::Validation("Invalid email address".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.nama_lengkap.trim().is_empty() {
            return Err(AuthError::Validation("nama_lengkap is required".into()));
        }

        let role = match self.role.as_deref().filter(|r| !r.is_empty()) {
            Some(raw) => raw
                .parse::<Role>()
                .map_err(|e| AuthError::Validation(e.to_string()))?,
            None => Role::default(),
        };
        if !open_role_registration && !role.is_self_assignable() {
            return Err(AuthError::Forbidden(format!(
                "Forbidden: role {role} cannot be self-assigned"
            )));
        }
        Ok(role)
    }

    /// Unit id with empty strings treated as absent.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit_kerja_id.as_deref().filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn request(role: Option<&str>) -> Registration {
        Registration {
            email: "operator@kominfo.go.id".into(),
            password: "rahasia".into(),
            nama_lengkap: "Operator Kominfo".into(),
            role: role.map(String::from),
            unit_kerja_id: Some("5".into()),
        }
    }

    #[test]
    fn role_defaults_to_operator() {
        assert_eq!(request(None).validate(false).unwrap(), Role::OperatorUnit);
        assert_eq!(request(Some("")).validate(false).unwrap(), Role::OperatorUnit);
    }

    #[rstest]
    #[case("verifikator")]
    #[case("super_admin")]
    fn privileged_roles_need_open_registration(#[case] role: &str) {
        assert!(matches!(
            request(Some(role)).validate(false),
            Err(AuthError::Forbidden(_))
        ));
        assert_eq!(
            request(Some(role)).validate(true).unwrap().as_str(),
            role
        );
    }

    #[test]
    fn unknown_role_is_validation_error() {
        let err = request(Some("admin")).validate(true).unwrap_err();
        assert_eq!(err.to_string(), "Invalid role: admin");
    }

    #[rstest]
    #[case("not-an-email", "rahasia")]
    #[case("a@b.go.id", "12345")]
    fn malformed_credentials_rejected(#[case] email: &str, #[case] password: &str) {
        let mut req = request(None);
        req.email = email.into();
        req.password = password.into();
        assert!(matches!(req.validate(false), Err(AuthError::Validation(_))));
    }

    #[test]
    fn empty_unit_is_absent() {
        let mut req = request(None);
        req.unit_kerja_id = Some(String::new());
        assert!(req.unit().is_none());
    }
}
