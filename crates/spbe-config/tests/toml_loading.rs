use figment::Jail;
use pretty_assertions::assert_eq;
use spbe_config::{SpbeConfig, StorageBackend};

#[test]
fn project_toml_is_loaded() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "spbe.toml",
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [storage]
            backend = "s3"
            bucket = "spbe-evidence"
            endpoint = "http://localhost:9000"
            access_key_id = "minio"
            secret_access_key = "minio-secret"
            "#,
        )?;

        let config = SpbeConfig::load().expect("config loads");
        assert_eq!(config.server.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.storage.backend, StorageBackend::S3);
        assert_eq!(config.storage.bucket, "spbe-evidence");
        assert_eq!(config.storage.cleanup_max_attempts, 5);
        Ok(())
    });
}

#[test]
fn explicit_config_file_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("spbe.toml", "[server]\nport = 9000\n")?;
        jail.create_file("override.toml", "[server]\nport = 9100\n")?;

        let path = jail.directory().join("override.toml");
        let config = SpbeConfig::load_from(Some(&path)).expect("config loads");
        assert_eq!(config.server.port, 9100);
        Ok(())
    });
}
