//! Photo capture from the file system
//!
//! This crate turns image files into captures for the photo journal:
//! - Image file detection and reading
//! - Inbox scanning (files already present at startup)
//! - Inbox watching with per-path debouncing

pub mod debounce;
pub mod inbox;
pub mod reconcile;

pub use debounce::Debouncer;
pub use inbox::InboxWatcher;
pub use reconcile::{scan_inbox, should_ignore};

use anyhow::{Context, Result};
use pl_core::record::now_ms;
use pl_core::Capture;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// File extensions treated as photos (lowercase)
pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "webp", "heic", "heif", "gif"];

/// Where a capture's timestamp comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampSource {
    /// Time of import
    #[default]
    Now,
    /// File modification time
    Mtime,
}

/// Whether the path names an image file, by extension
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Read an image file into a capture
pub fn read_capture(path: &Path, timestamp: TimestampSource) -> Result<Capture> {
    let payload = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let created_at = match timestamp {
        TimestampSource::Now => now_ms(),
        TimestampSource::Mtime => {
            let modified = std::fs::metadata(path)
                .and_then(|m| m.modified())
                .with_context(|| format!("Failed to read mtime of {}", path.display()))?;
            modified
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        }
    };

    Ok(Capture::new(payload, created_at))
}
