//! # spbe-db
//!
//! libSQL persistence for the SPBE evidence workflow.
//!
//! Handles all relational state: user profiles, reference data (units,
//! domains, aspects, indicators), evidence records, verification status
//! changes and their log, dashboard counts, local credentials and sessions, and
//! the blob cleanup queue. Works against a local file, `:memory:`, or a remote
//! libSQL server.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use libsql::params::IntoParams;
use tokio::sync::{RwLock, RwLockWriteGuard};

/// Central database handle.
///
/// One libSQL connection shared by every request. Plain statements hold the
/// gate for reading; [`SpbeDb::begin`] holds it for writing until the
/// transaction ends, so no other statement runs inside an open transaction.
pub struct SpbeDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    gate: RwLock<()>,
    remote: bool,
}

/// A transaction with exclusive use of the connection.
///
/// Dropping it without [`Tx::commit`] rolls back.
pub struct Tx<'a> {
    tx: libsql::Transaction,
    _gate: RwLockWriteGuard<'a, ()>,
}

impl Tx<'_> {
    /// # Errors
    ///
    /// Propagates the libSQL error.
    pub async fn execute(&self, sql: &str, params: impl IntoParams) -> Result<u64, DatabaseError> {
        Ok(self.tx.execute(sql, params).await?)
    }

    /// # Errors
    ///
    /// Propagates the libSQL error.
    pub async fn query(&self, sql: &str, params: impl IntoParams) -> Result<libsql::Rows, DatabaseError> {
        Ok(self.tx.query(sql, params).await?)
    }

    /// # Errors
    ///
    /// Propagates the libSQL error; the transaction is rolled back.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        Ok(())
    }
}

impl SpbeDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::from_database(db, false).await
    }

    /// Open a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        Self::from_database(db, true).await
    }

    async fn from_database(db: libsql::Database, remote: bool) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;

        // Foreign keys are per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let spbe_db = Self {
            db,
            conn,
            gate: RwLock::new(()),
            remote,
        };
        spbe_db.run_migrations().await?;
        Ok(spbe_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle talks to a remote server.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Execute one statement. Failures are returned as-is.
    ///
    /// # Errors
    ///
    /// `DatabaseError::LibSql` from the statement.
    pub async fn execute(&self, sql: &str, params: impl IntoParams) -> Result<u64, DatabaseError> {
        let _gate = self.gate.read().await;
        Ok(self.conn.execute(sql, params).await?)
    }

    /// Run a query.
    ///
    /// # Errors
    ///
    /// `DatabaseError::LibSql` from the query.
    pub async fn query(&self, sql: &str, params: impl IntoParams) -> Result<libsql::Rows, DatabaseError> {
        let _gate = self.gate.read().await;
        Ok(self.conn.query(sql, params).await?)
    }

    /// Run a `SELECT COUNT(*)`-style query and return the single integer.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the query yields no row.
    pub async fn count(&self, sql: &str, params: impl IntoParams) -> Result<i64, DatabaseError> {
        let mut rows = self.query(sql, params).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }

    /// Start a transaction. Other statements wait until it is committed or
    /// dropped.
    ///
    /// # Errors
    ///
    /// `DatabaseError::LibSql` if `BEGIN` fails.
    pub async fn begin(&self) -> Result<Tx<'_>, DatabaseError> {
        let gate = self.gate.write().await;
        let tx = self.conn.transaction().await?;
        Ok(Tx { tx, _gate: gate })
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"bkt-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .query(&format!("SELECT '{prefix}-' lower(hex(randomblob(4)))"), ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> SpbeDb {
        SpbeDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "unit_kerja",
            "domain_spbe",
            "aspek_spbe",
            "indikator_spbe",
            "users",
            "credentials",
            "auth_sessions",
            "bukti_dukung",
            "verifikasi_log",
            "blob_cleanup_queue",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn open_local_file_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spbe.db");
        let path = path.to_string_lossy();

        {
            let db = SpbeDb::open_local(&path).await.unwrap();
            db.conn()
                .execute(
                    "INSERT INTO unit_kerja (id, nama_unit, kode_unit) VALUES ('1', 'Bappeda', 'BAPPEDA')",
                    (),
                )
                .await
                .unwrap();
        }

        let db = SpbeDb::open_local(&path).await.unwrap();
        let count = db
            .count("SELECT COUNT(*) FROM unit_kerja", ())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("bkt").await.unwrap();
        assert!(id.starts_with("bkt-"), "ID should start with 'bkt-': {id}");
        assert_eq!(id.len(), 12, "ID should be 12 chars: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in spbe_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() {
        let db = test_db().await;
        {
            let tx = db.begin().await.unwrap();
            tx.execute(
                "INSERT INTO unit_kerja (id, nama_unit, kode_unit) VALUES ('1', 'Bappeda', 'BAPPEDA')",
                (),
            )
            .await
            .unwrap();
        }
        assert_eq!(db.count("SELECT COUNT(*) FROM unit_kerja", ()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn statements_wait_for_open_transaction() {
        let db = test_db().await;
        let tx = db.begin().await.unwrap();
        tx.execute(
            "INSERT INTO unit_kerja (id, nama_unit, kode_unit) VALUES ('1', 'Bappeda', 'BAPPEDA')",
            (),
        )
        .await
        .unwrap();

        let blocked = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            db.count("SELECT COUNT(*) FROM unit_kerja", ()),
        )
        .await;
        assert!(blocked.is_err(), "plain statement must not run inside an open transaction");

        tx.commit().await.unwrap();
        assert_eq!(db.count("SELECT COUNT(*) FROM unit_kerja", ()).await.unwrap(), 1);
        db.begin().await.unwrap().commit().await.unwrap();
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn status_check_constraint_rejects_unknown_values() {
        let db = test_db().await;
        db.conn()
            .execute_batch(
                "INSERT INTO unit_kerja (id, nama_unit, kode_unit) VALUES ('1', 'Bappeda', 'BAPPEDA');
                 INSERT INTO domain_spbe (id, nama_domain, urutan) VALUES ('d1', 'Kebijakan', 1);
                 INSERT INTO aspek_spbe (id, domain_id, nama_aspek, urutan) VALUES ('a1', 'd1', 'Kebijakan Internal', 1);
                 INSERT INTO indikator_spbe (id, aspek_id, kode_indikator, nama_indikator, urutan) VALUES ('i1', 'a1', 'I.1', 'Arsitektur', 1);
                 INSERT INTO users (id, email, nama_lengkap, unit_kerja_id) VALUES ('usr-1', 'op@example.go.id', 'Operator', '1');",
            )
            .await
            .unwrap();

        let result = db
            .conn()
            .execute(
                "INSERT INTO bukti_dukung (id, indikator_id, unit_kerja_id, uploaded_by, nama_file, file_path, status_verifikasi)
                 VALUES ('bkt-1', 'i1', '1', 'usr-1', 'a.pdf', '1/a.pdf', 'bad_value')",
                (),
            )
            .await;
        assert!(result.is_err(), "CHECK constraint should reject unknown status");
    }
}
