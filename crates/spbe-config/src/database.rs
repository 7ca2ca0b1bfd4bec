//! libSQL database configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    String::from("spbe.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote database URL (e.g., `libsql://spbe-prod.turso.io`). Takes
    /// precedence over `path` when set together with `auth_token`.
    #[serde(default)]
    pub url: String,

    /// Remote database auth token.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Check if a remote database is configured.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_local() {
        let config = DatabaseConfig::default();
        assert!(!config.is_remote());
        assert_eq!(config.path, "spbe.db");
    }

    #[test]
    fn remote_needs_url_and_token() {
        let mut config = DatabaseConfig {
            url: "libsql://spbe.turso.io".into(),
            ..Default::default()
        };
        assert!(!config.is_remote());

        config.auth_token = "token123".into();
        assert!(config.is_remote());
    }
}
