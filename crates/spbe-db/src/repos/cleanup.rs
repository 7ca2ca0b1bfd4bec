//! Queue of blobs whose deletion must be retried.

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, now_text};
use crate::service::SpbeService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedBlob {
    pub id: i64,
    pub bucket: String,
    pub file_path: String,
    pub attempts: i64,
    pub last_error: Option<String>,
}

impl SpbeService {
    /// Queue a blob for deletion. Re-queueing the same path only refreshes
    /// the recorded error.
    pub async fn enqueue_blob_cleanup(
        &self,
        bucket: &str,
        file_path: &str,
        error: &str,
    ) -> Result<(), DatabaseError> {
        let (_, now) = now_text();
        self.db()
            .execute(
                "INSERT INTO blob_cleanup_queue (bucket, file_path, last_error, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(bucket, file_path) DO UPDATE SET last_error = excluded.last_error",
                libsql::params![bucket, file_path, error, now.as_str()],
            )
            .await?;
        tracing::warn!(bucket, file_path, error, "blob deletion queued for retry");
        Ok(())
    }

    /// Oldest queued blobs first.
    pub async fn list_blob_cleanup(&self, limit: u32) -> Result<Vec<QueuedBlob>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT id, bucket, file_path, attempts, last_error
                 FROM blob_cleanup_queue ORDER BY id LIMIT ?1",
                [i64::from(limit)],
            )
            .await?;
        let mut queued = Vec::new();
        while let Some(row) = rows.next().await? {
            queued.push(QueuedBlob {
                id: row.get::<i64>(0)?,
                bucket: row.get::<String>(1)?,
                file_path: row.get::<String>(2)?,
                attempts: row.get::<i64>(3)?,
                last_error: get_opt_string(&row, 4)?,
            });
        }
        Ok(queued)
    }

    pub async fn remove_blob_cleanup(&self, id: i64) -> Result<(), DatabaseError> {
        self.db()
            .execute("DELETE FROM blob_cleanup_queue WHERE id = ?1", [id])
            .await?;
        Ok(())
    }

    /// Count a failed retry. Returns the new attempt count.
    pub async fn record_blob_cleanup_failure(
        &self,
        id: i64,
        error: &str,
    ) -> Result<i64, DatabaseError> {
        self.db()
            .execute(
                "UPDATE blob_cleanup_queue SET attempts = attempts + 1, last_error = ?1 WHERE id = ?2",
                libsql::params![error, id],
            )
            .await?;
        self.db()
            .count(
                "SELECT attempts FROM blob_cleanup_queue WHERE id = ?1",
                [id],
            )
            .await
    }

    pub async fn count_blob_cleanup(&self) -> Result<i64, DatabaseError> {
        self.db()
            .count("SELECT COUNT(*) FROM blob_cleanup_queue", ())
            .await
    }
}
