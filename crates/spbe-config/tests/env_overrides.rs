use figment::Jail;
use spbe_config::{AuthProvider, ConfigError, SpbeConfig, StorageBackend};

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("SPBE_SERVER__PORT", "8080");
        jail.set_env("SPBE_STORAGE__BACKEND", "memory");
        jail.set_env("SPBE_AUTH__OPEN_ROLE_REGISTRATION", "true");

        let config = SpbeConfig::load().expect("config loads");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.auth.open_role_registration);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "spbe.toml",
            r#"
            [database]
            path = "from-toml.db"
            "#,
        )?;
        jail.set_env("SPBE_DATABASE__PATH", "from-env.db");

        let config = SpbeConfig::load().expect("config loads");
        assert_eq!(config.database.path, "from-env.db");
        Ok(())
    });
}

#[test]
fn gotrue_without_url_is_not_configured() {
    Jail::expect_with(|jail| {
        jail.set_env("SPBE_AUTH__PROVIDER", "gotrue");

        let err = SpbeConfig::load().expect_err("gotrue needs url and key");
        assert!(matches!(err, ConfigError::NotConfigured { ref section } if section == "auth"));

        jail.set_env("SPBE_AUTH__GOTRUE_URL", "https://auth.example.go.id");
        jail.set_env("SPBE_AUTH__GOTRUE_API_KEY", "anon-key");
        let config = SpbeConfig::load().expect("config loads");
        assert_eq!(config.auth.provider, AuthProvider::Gotrue);
        Ok(())
    });
}

#[test]
fn unknown_backend_is_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("SPBE_STORAGE__BACKEND", "ftp");

        let err = SpbeConfig::load().expect_err("unknown backend");
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
