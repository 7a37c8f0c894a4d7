//! Time-windowed cleanup: remove every photo older than N months
//!
//! A month is a fixed 30 days, not a calendar month.

use crate::store::{delete_batch, PhotoStore};
use crate::{BatchError, CleanupError};
use pl_core::{PhotoId, PhotoRecord, DAY_MS};

/// Upper bound for the cleanup window (10 years)
pub const MAX_AGE_MONTHS: u32 = 120;

const MONTH_MS: u64 = 30 * DAY_MS;

/// Validated month count for a cleanup window (1..=120)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeMonths(u32);

impl AgeMonths {
    /// Rejects zero and negative counts; clamps anything above 120
    pub fn new(months: i64) -> Result<Self, CleanupError> {
        if months <= 0 {
            return Err(CleanupError::InvalidMonths(months));
        }
        Ok(Self(months.min(i64::from(MAX_AGE_MONTHS)) as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Timestamp before which photos are removed
pub fn cutoff_ms(now_ms: u64, months: AgeMonths) -> u64 {
    now_ms.saturating_sub(u64::from(months.get()) * MONTH_MS)
}

/// Outcome of a cleanup pass
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupReport {
    pub months: AgeMonths,
    pub cutoff_ms: u64,
    pub removed_ids: Vec<PhotoId>,
    pub freed_bytes: u64,
    /// Photo count before cleanup
    pub total_count: usize,
    /// Share of the collection removed, in percent, one decimal place
    pub removed_percent: f64,
}

impl CleanupReport {
    pub fn removed_count(&self) -> usize {
        self.removed_ids.len()
    }
}

fn percent_one_decimal(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let percent = part as f64 / whole as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}

/// Records created strictly before the cutoff, oldest first.
///
/// A record exactly at the cutoff is kept.
pub fn plan_cleanup(records: &[PhotoRecord], months: AgeMonths, now_ms: u64) -> Vec<&PhotoRecord> {
    let cutoff = cutoff_ms(now_ms, months);

    let mut victims: Vec<&PhotoRecord> = records.iter().filter(|r| r.created_at < cutoff).collect();
    victims.sort_by_key(|r| (r.created_at, r.id));
    victims
}

/// Remove every record selected by [`plan_cleanup`].
///
/// `records` is the store's full current contents. Deletes run sequentially
/// and stop at the first failure.
pub fn cleanup_older_than<S>(
    store: &S,
    records: &[PhotoRecord],
    months: AgeMonths,
    now_ms: u64,
) -> Result<CleanupReport, BatchError>
where
    S: PhotoStore + ?Sized,
{
    let victims = plan_cleanup(records, months, now_ms);

    let (removed_ids, freed_bytes) = if victims.is_empty() {
        (Vec::new(), 0)
    } else {
        delete_batch(store, &victims)?
    };

    if !removed_ids.is_empty() {
        tracing::info!(
            "Cleanup removed {} of {} photos older than {} months ({} bytes)",
            removed_ids.len(),
            records.len(),
            months.get(),
            freed_bytes
        );
    }

    Ok(CleanupReport {
        months,
        cutoff_ms: cutoff_ms(now_ms, months),
        removed_percent: percent_one_decimal(removed_ids.len(), records.len()),
        total_count: records.len(),
        removed_ids,
        freed_bytes,
    })
}
