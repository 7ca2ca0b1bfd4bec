use spbe_db::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing, unknown or expired bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("User already registered")]
    AlreadyRegistered,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error("identity provider error: {0}")]
    Provider(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
