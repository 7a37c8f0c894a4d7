//! Storage collaborator interface

use crate::{BatchError, Result, StoreError};
use pl_core::{Capture, PhotoId, PhotoRecord};

/// Persistent photo store keyed by auto-incrementing id.
///
/// Callers treat the store as shared: every operation re-lists the full
/// collection rather than caching it between calls.
pub trait PhotoStore: Send + Sync {
    /// Persist a capture, returning its new id.
    ///
    /// Returns `Ok(None)` when no backend is available.
    fn insert(&self, capture: Capture) -> Result<Option<PhotoId>>;

    /// Every record with its payload loaded
    fn list_all(&self) -> Result<Vec<PhotoRecord>>;

    /// Every record without payloads; sizes come from the cached `size`
    fn list_headers(&self) -> Result<Vec<PhotoRecord>> {
        Ok(self.list_all()?.iter().map(PhotoRecord::header).collect())
    }

    fn get(&self, id: PhotoId) -> Result<Option<PhotoRecord>>;

    /// Remove a record; deleting an unknown id is not an error
    fn delete(&self, id: PhotoId) -> Result<()>;
}

/// Stand-in used when no persistence backend can be opened.
///
/// Lists are empty and writes are dropped, so callers see an empty library
/// rather than an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl PhotoStore for UnavailableStore {
    fn insert(&self, _capture: Capture) -> Result<Option<PhotoId>> {
        tracing::warn!("Photo store unavailable; capture not saved");
        Ok(None)
    }

    fn list_all(&self) -> Result<Vec<PhotoRecord>> {
        Ok(Vec::new())
    }

    fn get(&self, _id: PhotoId) -> Result<Option<PhotoRecord>> {
        Ok(None)
    }

    fn delete(&self, _id: PhotoId) -> Result<()> {
        Ok(())
    }
}

/// Delete `victims` one at a time, in order.
///
/// Each delete completes before the next starts. The first failure stops
/// the batch and reports what was already removed.
pub(crate) fn delete_batch<S>(store: &S, victims: &[&PhotoRecord]) -> std::result::Result<(Vec<PhotoId>, u64), BatchError>
where
    S: PhotoStore + ?Sized,
{
    let mut removed_ids = Vec::with_capacity(victims.len());
    let mut freed_bytes = 0u64;

    for victim in victims {
        let deleted = victim
            .id
            .ok_or(StoreError::MissingId)
            .and_then(|id| store.delete(id).map(|()| id));

        match deleted {
            Ok(id) => {
                let bytes = victim.byte_size();
                tracing::debug!("Deleted photo {} ({} bytes)", id, bytes);
                removed_ids.push(id);
                freed_bytes += bytes;
            }
            Err(source) => {
                tracing::warn!(
                    "Batch delete stopped after {} photos: {}",
                    removed_ids.len(),
                    source
                );
                return Err(BatchError {
                    removed_ids,
                    freed_bytes,
                    source,
                });
            }
        }
    }

    Ok((removed_ids, freed_bytes))
}
