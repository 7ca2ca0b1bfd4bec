//! Background retry of queued blob deletions.

use std::sync::Arc;
use std::time::Duration;

use spbe_db::error::DatabaseError;
use spbe_db::service::SpbeService;
use spbe_storage::BlobStore;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const SWEEP_BATCH: u32 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub released: usize,
    pub failed: usize,
    pub dropped: usize,
}

impl SweepReport {
    const fn is_idle(&self) -> bool {
        self.released == 0 && self.failed == 0 && self.dropped == 0
    }
}

/// Retry one batch of queued deletions, oldest first.
///
/// Entries that reach `max_attempts` failures are dropped.
pub async fn sweep_once(
    db: &SpbeService,
    blobs: &dyn BlobStore,
    max_attempts: u32,
) -> Result<SweepReport, DatabaseError> {
    let mut report = SweepReport::default();

    for queued in db.list_blob_cleanup(SWEEP_BATCH).await? {
        let outcome = if queued.bucket == blobs.bucket() {
            blobs.delete(&queued.file_path).await.map_err(|e| e.to_string())
        } else {
            Err(format!("bucket {} is not served by this store", queued.bucket))
        };

        match outcome {
            Ok(()) => {
                db.remove_blob_cleanup(queued.id).await?;
                tracing::info!(file_path = %queued.file_path, "queued blob released");
                report.released += 1;
            }
            Err(error) => {
                let attempts = db.record_blob_cleanup_failure(queued.id, &error).await?;
                if attempts >= i64::from(max_attempts) {
                    tracing::warn!(
                        file_path = %queued.file_path,
                        attempts,
                        %error,
                        "giving up on blob deletion"
                    );
                    db.remove_blob_cleanup(queued.id).await?;
                    report.dropped += 1;
                } else {
                    tracing::debug!(file_path = %queued.file_path, attempts, %error, "blob deletion retry failed");
                    report.failed += 1;
                }
            }
        }
    }

    Ok(report)
}

/// Run [`sweep_once`] every `interval` until the runtime shuts down.
pub fn spawn(
    db: Arc<SpbeService>,
    blobs: Arc<dyn BlobStore>,
    interval: Duration,
    max_attempts: u32,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match sweep_once(&db, blobs.as_ref(), max_attempts).await {
                Ok(report) if report.is_idle() => {}
                Ok(report) => tracing::info!(?report, "blob cleanup sweep finished"),
                Err(error) => tracing::warn!(%error, "blob cleanup sweep failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spbe_storage::ObjectBlobStore;

    use crate::test_support::FailingBlobStore;

    async fn service() -> SpbeService {
        SpbeService::new_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn successful_retry_empties_the_queue() {
        let db = service().await;
        let blobs = ObjectBlobStore::in_memory("bukti_dukung_spbe");
        blobs
            .put("5/1_a.pdf", b"x".to_vec(), "application/pdf")
            .await
            .unwrap();
        db.enqueue_blob_cleanup("bukti_dukung_spbe", "5/1_a.pdf", "timeout")
            .await
            .unwrap();

        let report = sweep_once(&db, &blobs, 5).await.unwrap();
        assert_eq!(report.released, 1);
        assert_eq!(db.count_blob_cleanup().await.unwrap(), 0);
        assert!(!blobs.exists("5/1_a.pdf").await.unwrap());
    }

    #[tokio::test]
    async fn entries_are_dropped_after_max_attempts() {
        let db = service().await;
        db.enqueue_blob_cleanup("bukti_dukung_spbe", "5/1_a.pdf", "timeout")
            .await
            .unwrap();

        let first = sweep_once(&db, &FailingBlobStore, 2).await.unwrap();
        assert_eq!(first.failed, 1);
        assert_eq!(db.count_blob_cleanup().await.unwrap(), 1);

        let second = sweep_once(&db, &FailingBlobStore, 2).await.unwrap();
        assert_eq!(second.dropped, 1);
        assert_eq!(db.count_blob_cleanup().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn foreign_bucket_counts_as_a_failure() {
        let db = service().await;
        let blobs = ObjectBlobStore::in_memory("bukti_dukung_spbe");
        db.enqueue_blob_cleanup("old_bucket", "5/1_a.pdf", "timeout")
            .await
            .unwrap();

        let report = sweep_once(&db, &blobs, 5).await.unwrap();
        assert_eq!(report.failed, 1);
        let queued = db.list_blob_cleanup(10).await.unwrap();
        assert_eq!(queued[0].attempts, 1);
    }
}
