//! Unit (unit kerja) repository. Read-only over HTTP; written by seeding.

use spbe_core::entities::Unit;

use crate::error::DatabaseError;
use crate::service::SpbeService;

pub(crate) fn row_to_unit(row: &libsql::Row, offset: i32) -> Result<Unit, DatabaseError> {
    Ok(Unit {
        id: row.get::<String>(offset)?,
        nama_unit: row.get::<String>(offset + 1)?,
        kode_unit: row.get::<String>(offset + 2)?,
    })
}

/// Read a LEFT JOINed unit whose columns start at `offset`.
pub(crate) fn row_to_opt_unit(row: &libsql::Row, offset: i32) -> Result<Option<Unit>, DatabaseError> {
    if row.get::<Option<String>>(offset)?.is_none() {
        return Ok(None);
    }
    row_to_unit(row, offset).map(Some)
}

impl SpbeService {
    /// All units, ordered by name.
    pub async fn list_units(&self) -> Result<Vec<Unit>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT id, nama_unit, kode_unit FROM unit_kerja ORDER BY nama_unit",
                (),
            )
            .await?;

        let mut units = Vec::new();
        while let Some(row) = rows.next().await? {
            units.push(row_to_unit(&row, 0)?);
        }
        Ok(units)
    }

    pub async fn get_unit(&self, id: &str) -> Result<Option<Unit>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT id, nama_unit, kode_unit FROM unit_kerja WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_unit(&row, 0)?)),
            None => Ok(None),
        }
    }

    pub async fn count_units(&self) -> Result<i64, DatabaseError> {
        self.db()
            .count("SELECT COUNT(*) FROM unit_kerja", ())
            .await
    }

    /// Insert or replace a unit by id.
    pub async fn upsert_unit(&self, unit: &Unit) -> Result<(), DatabaseError> {
        self.db()
            .execute(
                "INSERT INTO unit_kerja (id, nama_unit, kode_unit) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET nama_unit = excluded.nama_unit, kode_unit = excluded.kode_unit",
                libsql::params![
                    unit.id.as_str(),
                    unit.nama_unit.as_str(),
                    unit.kode_unit.as_str()
                ],
            )
            .await?;
        Ok(())
    }
}
