//! Identity provider configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Which identity provider issues and resolves bearer tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    /// Credentials and sessions stored in the service's own database.
    #[default]
    Local,
    /// A GoTrue-compatible remote auth server.
    Gotrue,
}

/// One day.
const fn default_session_ttl_secs() -> u64 {
    86_400
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub provider: AuthProvider,

    /// Lifetime of sessions issued by the local provider.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Base URL of the GoTrue server (e.g., `https://project.supabase.co`).
    #[serde(default)]
    pub gotrue_url: String,

    /// API key sent as the `apikey` header to GoTrue.
    #[serde(default)]
    pub gotrue_api_key: String,

    /// Allow self-registration as `verifikator` or `super_admin`.
    #[serde(default)]
    pub open_role_registration: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: AuthProvider::default(),
            session_ttl_secs: default_session_ttl_secs(),
            gotrue_url: String::new(),
            gotrue_api_key: String::new(),
            open_role_registration: false,
        }
    }
}

impl AuthConfig {
    /// Check if the selected provider has its required fields.
    pub fn is_configured(&self) -> bool {
        match self.provider {
            AuthProvider::Local => self.session_ttl_secs > 0,
            AuthProvider::Gotrue => !self.gotrue_url.is_empty() && !self.gotrue_api_key.is_empty(),
        }
    }

    /// Validate the section, naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider == AuthProvider::Local && self.session_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.session_ttl_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "auth".into(),
            });
        }
        Ok(())
    }
}
