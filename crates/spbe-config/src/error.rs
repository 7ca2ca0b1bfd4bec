use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer failed to parse or a value has the wrong type.
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A backend was selected without the settings it needs.
    #[error("[{section}] selects a backend whose required settings are missing")]
    NotConfigured { section: String },

    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
