//! Aggregate storage statistics

use crate::PhotoRecord;

/// Count and byte totals for a record collection
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StorageTotals {
    pub count: usize,
    pub bytes: u64,
    /// `bytes / count`, or `0.0` for an empty collection
    pub avg_bytes: f64,
}

/// Compute totals over any record collection (may be empty)
pub fn compute_totals(records: &[PhotoRecord]) -> StorageTotals {
    if records.is_empty() {
        return StorageTotals::default();
    }

    let bytes: u64 = records.iter().map(PhotoRecord::byte_size).sum();

    StorageTotals {
        count: records.len(),
        bytes,
        avg_bytes: bytes as f64 / records.len() as f64,
    }
}
