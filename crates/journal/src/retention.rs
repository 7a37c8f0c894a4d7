//! Retention limits: oldest-first eviction down to count and size ceilings

use crate::store::{delete_batch, PhotoStore};
use crate::BatchError;
use pl_core::{compute_totals, PhotoId, PhotoRecord, Settings};

/// Retention policy configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Maximum number of stored photos (default: 1000)
    pub max_count: usize,
    /// Maximum total payload bytes (default: 500 MiB)
    pub max_bytes: u64,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl RetentionPolicy {
    pub fn new(max_count: usize, max_bytes: u64) -> Self {
        Self {
            max_count,
            max_bytes,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.max_photos(), settings.max_bytes())
    }

    /// Both ceilings hold
    pub fn allows(&self, count: usize, bytes: u64) -> bool {
        count <= self.max_count && bytes <= self.max_bytes
    }
}

/// Outcome of one enforcement pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnforcementReport {
    pub removed_ids: Vec<PhotoId>,
    pub freed_bytes: u64,
    pub remaining_count: usize,
    pub remaining_bytes: u64,
}

impl EnforcementReport {
    pub fn removed_count(&self) -> usize {
        self.removed_ids.len()
    }
}

/// Select the photos to evict.
///
/// Empty when the collection is within both limits. Otherwise walks the
/// records oldest first (ties by id) and takes each one until the count and
/// byte ceilings hold together, which is the smallest oldest-first prefix
/// satisfying both. A single record larger than `max_bytes` is evicted as
/// well; an empty collection always satisfies the policy.
pub fn plan_evictions<'a>(records: &'a [PhotoRecord], policy: &RetentionPolicy) -> Vec<&'a PhotoRecord> {
    let totals = compute_totals(records);
    let mut count = totals.count;
    let mut bytes = totals.bytes;

    if policy.allows(count, bytes) {
        return Vec::new();
    }

    let mut oldest_first: Vec<&PhotoRecord> = records.iter().collect();
    oldest_first.sort_by_key(|r| (r.created_at, r.id));

    let mut victims = Vec::new();
    for record in oldest_first {
        if policy.allows(count, bytes) {
            break;
        }
        count -= 1;
        bytes = bytes.saturating_sub(record.byte_size());
        victims.push(record);
    }
    victims
}

/// Applies a [`RetentionPolicy`] to a store
pub struct RetentionEnforcer {
    policy: RetentionPolicy,
}

impl RetentionEnforcer {
    /// Create a new enforcer with the given policy
    pub fn new(policy: RetentionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    /// Evict from `store` so that `records` (its current contents) fit the policy.
    ///
    /// Deletes run sequentially; on failure the error carries the ids already
    /// removed. Running again without new inserts removes nothing.
    pub fn enforce<S>(&self, store: &S, records: &[PhotoRecord]) -> Result<EnforcementReport, BatchError>
    where
        S: PhotoStore + ?Sized,
    {
        let totals = compute_totals(records);
        let victims = plan_evictions(records, &self.policy);

        if victims.is_empty() {
            return Ok(EnforcementReport {
                remaining_count: totals.count,
                remaining_bytes: totals.bytes,
                ..EnforcementReport::default()
            });
        }

        let (removed_ids, freed_bytes) = delete_batch(store, &victims)?;

        tracing::info!(
            "Retention removed {} photos ({} bytes) to fit {} photos / {} bytes",
            removed_ids.len(),
            freed_bytes,
            self.policy.max_count,
            self.policy.max_bytes
        );

        Ok(EnforcementReport {
            remaining_count: totals.count - removed_ids.len(),
            remaining_bytes: totals.bytes - freed_bytes,
            removed_ids,
            freed_bytes,
        })
    }

    /// Re-list the store, then enforce
    pub fn enforce_store<S>(&self, store: &S) -> Result<EnforcementReport, BatchError>
    where
        S: PhotoStore + ?Sized,
    {
        let records = store.list_headers().map_err(|source| BatchError {
            removed_ids: Vec::new(),
            freed_bytes: 0,
            source,
        })?;
        self.enforce(store, &records)
    }
}
