//! Photo record data structures

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Store-assigned photo identifier
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PhotoId(u64);

impl PhotoId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Big-endian key bytes, so lexicographic order matches id order
    pub fn to_key(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    pub fn from_key(key: &[u8]) -> Option<Self> {
        let raw: [u8; 8] = key.try_into().ok()?;
        Some(Self(u64::from_be_bytes(raw)))
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    /// Assigned by the store on insert, absent before the first save
    pub id: Option<PhotoId>,
    /// Capture time (Unix milliseconds), never mutated
    pub created_at: u64,
    /// Encoded image, `None` when listed without payloads
    pub payload: Option<Bytes>,
    /// Cached byte length of the payload
    pub size: u64,
}

impl PhotoRecord {
    /// Byte size used for all aggregate accounting.
    ///
    /// Prefers the live payload length and falls back to the cached `size`
    /// when the payload is missing or empty.
    pub fn byte_size(&self) -> u64 {
        match &self.payload {
            Some(payload) if !payload.is_empty() => payload.len() as u64,
            _ => self.size,
        }
    }

    /// Copy of this record without its payload
    pub fn header(&self) -> Self {
        Self {
            id: self.id,
            created_at: self.created_at,
            payload: None,
            size: self.size,
        }
    }
}

/// Output of the capture collaborator: an encoded image taken at a known time
#[derive(Debug, Clone)]
pub struct Capture {
    pub payload: Bytes,
    pub created_at: u64,
}

impl Capture {
    pub fn new(payload: impl Into<Bytes>, created_at: u64) -> Self {
        Self {
            payload: payload.into(),
            created_at,
        }
    }

    /// Capture stamped with the current wall clock
    pub fn now(payload: impl Into<Bytes>) -> Self {
        Self::new(payload, now_ms())
    }

    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }

    /// Id-less record ready for insertion
    pub fn into_record(self) -> PhotoRecord {
        let size = self.size();
        PhotoRecord {
            id: None,
            created_at: self.created_at,
            payload: Some(self.payload),
            size,
        }
    }
}

/// Current Unix time in milliseconds
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
