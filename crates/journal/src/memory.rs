//! In-memory photo store

use crate::store::PhotoStore;
use crate::{Result, StoreError};
use parking_lot::RwLock;
use pl_core::{Capture, PhotoId, PhotoRecord};
use std::collections::{BTreeMap, HashSet};

#[derive(Default)]
struct Inner {
    photos: BTreeMap<PhotoId, PhotoRecord>,
    next_id: u64,
    failing_deletes: HashSet<PhotoId>,
}

/// Volatile store with the same id semantics as [`crate::PhotoJournal`].
///
/// Deletes can be made to fail for chosen ids, which is how batch abort
/// behaviour is exercised.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with captures, in order
    pub fn with_captures(captures: impl IntoIterator<Item = Capture>) -> Result<Self> {
        let store = Self::new();
        for capture in captures {
            store.insert(capture)?;
        }
        Ok(store)
    }

    /// Make every future delete of `id` fail
    pub fn fail_delete_of(&self, id: PhotoId) {
        self.inner.write().failing_deletes.insert(id);
    }

    pub fn len(&self) -> usize {
        self.inner.read().photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().photos.is_empty()
    }

    pub fn ids(&self) -> Vec<PhotoId> {
        self.inner.read().photos.keys().copied().collect()
    }
}

impl PhotoStore for MemoryStore {
    fn insert(&self, capture: Capture) -> Result<Option<PhotoId>> {
        let mut inner = self.inner.write();
        inner.next_id += 1;
        let id = PhotoId::new(inner.next_id);

        let mut record = capture.into_record();
        record.id = Some(id);
        inner.photos.insert(id, record);

        Ok(Some(id))
    }

    fn list_all(&self) -> Result<Vec<PhotoRecord>> {
        Ok(self.inner.read().photos.values().cloned().collect())
    }

    fn list_headers(&self) -> Result<Vec<PhotoRecord>> {
        Ok(self
            .inner
            .read()
            .photos
            .values()
            .map(PhotoRecord::header)
            .collect())
    }

    fn get(&self, id: PhotoId) -> Result<Option<PhotoRecord>> {
        Ok(self.inner.read().photos.get(&id).cloned())
    }

    fn delete(&self, id: PhotoId) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.failing_deletes.contains(&id) {
            return Err(StoreError::Rejected(format!("delete of photo {id} refused")));
        }
        inner.photos.remove(&id);
        Ok(())
    }
}
