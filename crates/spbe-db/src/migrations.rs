//! Embedded schema. Every statement is `IF NOT EXISTS`, so opening an
//! existing database re-applies nothing.

use crate::SpbeDb;
use crate::error::DatabaseError;

const SCHEMA: &[(&str, &str)] = &[("001_initial", include_str!("../migrations/001_initial.sql"))];

impl SpbeDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        for (name, sql) in SCHEMA {
            self.conn
                .execute_batch(sql)
                .await
                .map_err(|e| DatabaseError::Migration(format!("{name}: {e}")))?;
            tracing::debug!(migration = name, "schema applied");
        }
        Ok(())
    }
}
