//! Error types for the photo journal

use pl_core::PhotoId;
use thiserror::Error;

/// A storage collaborator call failed
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sled::Error),

    #[error("corrupt photo header: {0}")]
    Codec(#[from] bincode::Error),

    #[error("photo {0} has a header but no payload")]
    MissingPayload(PhotoId),

    #[error("record has no id (it was never saved)")]
    MissingId,

    #[error("store rejected the operation: {0}")]
    Rejected(String),
}

/// A delete inside a batch (retention or cleanup) failed.
///
/// The batch stops at the first failure; the photos listed in `removed_ids`
/// were already deleted and stay deleted.
#[derive(Debug, Error)]
#[error("batch aborted after removing {} photos ({freed_bytes} bytes): {source}", .removed_ids.len())]
pub struct BatchError {
    pub removed_ids: Vec<PhotoId>,
    pub freed_bytes: u64,
    #[source]
    pub source: StoreError,
}

/// Time-windowed cleanup was asked for with an unusable window
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("month count must be a positive integer, got {0}")]
    InvalidMonths(i64),
}
