//! Photo journal and retention management
//!
//! This crate provides:
//! - The storage collaborator trait (`PhotoStore`)
//! - Sled-backed photo journal with persistent auto-increment ids
//! - In-memory and unavailable stores
//! - Retention limits (oldest-first eviction)
//! - Time-windowed cleanup

pub mod cleanup;
pub mod error;
pub mod journal;
pub mod memory;
pub mod retention;
pub mod store;

// Re-exports
pub use cleanup::{cleanup_older_than, cutoff_ms, plan_cleanup, AgeMonths, CleanupReport};
pub use error::{BatchError, CleanupError, StoreError};
pub use journal::PhotoJournal;
pub use memory::MemoryStore;
pub use retention::{plan_evictions, EnforcementReport, RetentionEnforcer, RetentionPolicy};
pub use store::{PhotoStore, UnavailableStore};

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
