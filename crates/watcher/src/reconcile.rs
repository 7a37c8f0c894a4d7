//! Inbox reconciliation scanner
//!
//! Finds photos already sitting in the inbox when watching starts, or that
//! arrived while no watcher was running.

use crate::is_image_path;
use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Suffixes left behind by in-progress copies and downloads
const PARTIAL_SUFFIXES: [&str; 4] = [".part", ".tmp", ".crdownload", ".download"];

/// List image files directly inside `inbox`, sorted by path
pub fn scan_inbox(inbox: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(inbox)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry?;

        // Only check files
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !should_ignore(path) && is_image_path(path) {
            found.push(path.to_path_buf());
        }
    }

    found.sort();
    tracing::debug!("Inbox scan of {} found {} photos", inbox.display(), found.len());
    Ok(found)
}

/// Check if path should be ignored: hidden files, library internals and
/// partially written files
pub fn should_ignore(path: &Path) -> bool {
    for component in path.components() {
        if let Some(comp_str) = component.as_os_str().to_str() {
            if comp_str == ".pl" {
                return true;
            }
        }
    }

    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return true;
    };

    name.starts_with('.')
        || name.ends_with('~')
        || PARTIAL_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}
