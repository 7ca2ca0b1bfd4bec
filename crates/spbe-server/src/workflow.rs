//! Two-step operations spanning the database and the blob store.
//!
//! A record-create failure after an upload deletes the uploaded blob. A blob
//! delete failure after the row is gone queues the path for the sweeper.

use spbe_core::blob::is_within_unit;
use spbe_core::entities::{EvidenceDetail, Profile};
use spbe_db::repos::evidence::NewEvidence;

use crate::http::{ApiError, AppState};

/// Create an evidence record, releasing the referenced upload on failure.
pub async fn create_evidence(
    state: &AppState,
    new: &NewEvidence,
    actor: &Profile,
) -> Result<EvidenceDetail, ApiError> {
    match state.db.create_evidence(new, actor).await {
        Ok(detail) => Ok(detail),
        Err(error) => {
            if let Some(path) = uploaded_by_actor(new, actor) {
                tracing::debug!(file_path = %path, error = %error, "create failed; releasing upload");
                release_blob(state, path).await;
            }
            Err(error.into())
        }
    }
}

/// The payload's blob path, when it lies in the actor's own upload area.
fn uploaded_by_actor<'a>(new: &'a NewEvidence, actor: &Profile) -> Option<&'a str> {
    if !actor.role.can_submit_evidence() {
        return None;
    }
    let path = new.file_path.as_deref()?;
    let unit = actor.unit_kerja_id.as_deref()?;
    is_within_unit(path, unit).then_some(path)
}

/// Delete an evidence record and then its blob. Absent records succeed.
pub async fn delete_evidence(state: &AppState, id: &str, actor: &Profile) -> Result<(), ApiError> {
    let Some(removed) = state.db.delete_evidence(id, actor).await? else {
        return Ok(());
    };
    release_blob(state, &removed.file_path).await;
    Ok(())
}

/// Best-effort blob removal. Paths still referenced by a record are kept;
/// failed deletions are queued for retry.
async fn release_blob(state: &AppState, path: &str) {
    match state.db.blob_in_use(path).await {
        Ok(false) => {}
        Ok(true) => {
            tracing::debug!(file_path = %path, "blob still referenced; keeping it");
            return;
        }
        Err(error) => {
            tracing::warn!(file_path = %path, %error, "could not check blob references; keeping it");
            return;
        }
    }

    let Err(error) = state.blobs.delete(path).await else {
        tracing::debug!(file_path = %path, "blob released");
        return;
    };
    tracing::warn!(file_path = %path, %error, "blob deletion failed");

    let bucket = state.blobs.bucket();
    if let Err(queue_error) = state
        .db
        .enqueue_blob_cleanup(bucket, path, &error.to_string())
        .await
    {
        tracing::error!(file_path = %path, error = %queue_error, "failed to queue blob for cleanup");
    }
}
