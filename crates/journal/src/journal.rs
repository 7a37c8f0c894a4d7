//! Sled-backed photo journal

use crate::store::PhotoStore;
use crate::{Result, StoreError};
use bytes::Bytes;
use pl_core::{Capture, PhotoId, PhotoRecord};
use serde::{Deserialize, Serialize};
use sled::transaction::{TransactionError, TransactionResult};
use sled::{Db, Transactional, Tree};
use std::path::Path;

const NEXT_ID_KEY: &[u8] = b"next_id";

const FIRST_ID: PhotoId = PhotoId::new(1);

/// Small per-photo record kept apart from the payload so listings and
/// totals never touch image bytes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PhotoHeader {
    created_at: u64,
    size: u64,
}

/// Persistent photo store.
///
/// Layout inside `photos.db`:
/// - `headers`: id (big-endian u64) -> bincode `PhotoHeader`
/// - `payloads`: id -> raw image bytes
/// - `meta`: `next_id` -> big-endian u64
///
/// The id counter is bumped in the same transaction as the insert, so ids
/// start at 1, keep increasing across reopen and are never reused after a
/// delete.
pub struct PhotoJournal {
    db: Db,
    headers: Tree,
    payloads: Tree,
    meta: Tree,
}

impl PhotoJournal {
    /// Open or create a journal in the given directory
    pub fn open(path: &Path) -> Result<Self> {
        let db = sled::open(path.join("photos.db"))?;
        let headers = db.open_tree("headers")?;
        let payloads = db.open_tree("payloads")?;
        let meta = db.open_tree("meta")?;

        tracing::debug!(
            "Opened photo journal at {} ({} photos)",
            path.display(),
            headers.len()
        );

        Ok(Self {
            db,
            headers,
            payloads,
            meta,
        })
    }

    /// Number of stored photos
    pub fn count(&self) -> usize {
        self.headers.len()
    }

    fn decode(key: &[u8], value: &[u8]) -> Result<(PhotoId, PhotoHeader)> {
        let id = PhotoId::from_key(key)
            .ok_or_else(|| StoreError::Rejected(format!("malformed key of {} bytes", key.len())))?;
        let header: PhotoHeader = bincode::deserialize(value)?;
        Ok((id, header))
    }

    fn load_payload(&self, id: PhotoId) -> Result<Bytes> {
        match self.payloads.get(id.to_key())? {
            Some(bytes) => Ok(Bytes::copy_from_slice(&bytes)),
            None => Err(StoreError::MissingPayload(id)),
        }
    }
}

fn record(id: PhotoId, header: PhotoHeader, payload: Option<Bytes>) -> PhotoRecord {
    PhotoRecord {
        id: Some(id),
        created_at: header.created_at,
        payload,
        size: header.size,
    }
}

fn map_transaction(err: TransactionError<()>) -> StoreError {
    match err {
        TransactionError::Storage(e) => StoreError::Database(e),
        TransactionError::Abort(()) => StoreError::Rejected("transaction aborted".to_string()),
    }
}

impl PhotoStore for PhotoJournal {
    fn insert(&self, capture: Capture) -> Result<Option<PhotoId>> {
        let size = capture.size();
        let header = bincode::serialize(&PhotoHeader {
            created_at: capture.created_at,
            size,
        })?;

        let result: TransactionResult<PhotoId> = (&self.headers, &self.payloads, &self.meta)
            .transaction(|(headers, payloads, meta)| {
                let id = meta
                    .get(NEXT_ID_KEY)?
                    .and_then(|raw| PhotoId::from_key(&raw))
                    .unwrap_or(FIRST_ID);
                let next = PhotoId::new(id.get() + 1);

                meta.insert(NEXT_ID_KEY, &next.to_key()[..])?;
                payloads.insert(&id.to_key()[..], capture.payload.as_ref())?;
                headers.insert(&id.to_key()[..], header.as_slice())?;
                Ok(id)
            });
        let id = result.map_err(map_transaction)?;

        // Flush to ensure durability
        self.db.flush()?;

        tracing::debug!("Stored photo {} ({} bytes)", id, size);
        Ok(Some(id))
    }

    fn list_all(&self) -> Result<Vec<PhotoRecord>> {
        let mut records = Vec::with_capacity(self.headers.len());
        for item in self.headers.iter() {
            let (key, value) = item?;
            let (id, header) = Self::decode(&key, &value)?;
            let payload = self.load_payload(id)?;
            records.push(record(id, header, Some(payload)));
        }
        Ok(records)
    }

    fn list_headers(&self) -> Result<Vec<PhotoRecord>> {
        let mut records = Vec::with_capacity(self.headers.len());
        for item in self.headers.iter() {
            let (key, value) = item?;
            let (id, header) = Self::decode(&key, &value)?;
            records.push(record(id, header, None));
        }
        Ok(records)
    }

    fn get(&self, id: PhotoId) -> Result<Option<PhotoRecord>> {
        let value = match self.headers.get(id.to_key())? {
            Some(v) => v,
            None => return Ok(None),
        };

        let (_, header) = Self::decode(&id.to_key(), &value)?;
        let payload = self.load_payload(id)?;
        Ok(Some(record(id, header, Some(payload))))
    }

    fn delete(&self, id: PhotoId) -> Result<()> {
        let key = id.to_key();

        let result: TransactionResult<()> =
            (&self.headers, &self.payloads).transaction(|(headers, payloads)| {
                headers.remove(&key[..])?;
                payloads.remove(&key[..])?;
                Ok(())
            });
        result.map_err(map_transaction)?;

        self.db.flush()?;
        Ok(())
    }
}
