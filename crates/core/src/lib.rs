//! Photolapse core - pure domain logic for the photo journal
//!
//! This crate provides:
//! - Photo records and captures
//! - Storage totals (count, bytes, average)
//! - Session building by capture gap
//! - Typed, clamped settings

pub mod record;
pub mod session;
pub mod settings;
pub mod totals;

// Re-export main types for convenience
pub use record::{Capture, PhotoId, PhotoRecord};
pub use session::{build_sessions, find_session, resolve_active, Session, SessionKey};
pub use settings::{Settings, SettingsError};
pub use totals::{compute_totals, StorageTotals};

/// Milliseconds in one minute
pub const MINUTE_MS: u64 = 60 * 1000;

/// Milliseconds in one day
pub const DAY_MS: u64 = 24 * 60 * MINUTE_MS;
