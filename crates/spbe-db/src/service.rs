//! Service layer owning the database handle.
//!
//! `SpbeService` wraps `SpbeDb` (raw database access). All repo methods are
//! implemented as `impl SpbeService` blocks under `repos/`. One instance is
//! built by the composition root and shared behind an `Arc`.

use crate::SpbeDb;
use crate::error::DatabaseError;

pub struct SpbeService {
    db: SpbeDb,
}

impl SpbeService {
    /// Create a new service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = SpbeDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create a service backed by a remote libSQL server.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established.
    pub async fn new_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = SpbeDb::open_remote(url, auth_token).await?;
        Ok(Self { db })
    }

    /// Create from an existing `SpbeDb`.
    #[must_use]
    pub const fn from_db(db: SpbeDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &SpbeDb {
        &self.db
    }
}
