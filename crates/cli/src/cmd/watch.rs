//! Import photos from an inbox directory as they arrive
//!
//! Imported files are removed from the inbox once they are stored, so a
//! restart does not import them twice.

use crate::library::Library;
use crate::system_config;
use anyhow::{Context, Result};
use journal::PhotoStore;
use owo_colors::OwoColorize;
use pl_core::Settings;
use std::path::Path;
use std::time::Duration;
use watcher::{InboxWatcher, TimestampSource};

use super::import::{enforce_if_enabled, import_file};

pub async fn run(
    library: Option<&Path>,
    inbox: &Path,
    once: bool,
    debounce_ms: u64,
    timestamp: TimestampSource,
) -> Result<()> {
    let library = Library::locate(library)?;
    let settings = system_config::load(&library)?;
    let journal = library.open_journal()?;

    if !inbox.is_dir() {
        anyhow::bail!("Inbox is not a directory: {}", inbox.display());
    }

    // The watch is registered before the scan, so a file that lands while
    // the backlog imports still produces an event
    let (mut inbox_watcher, pending) = if once {
        (None, watcher::scan_inbox(inbox)?)
    } else {
        let (inbox_watcher, pending) =
            InboxWatcher::start_with_backlog(inbox, Duration::from_millis(debounce_ms))?;
        (Some(inbox_watcher), pending)
    };

    if !pending.is_empty() {
        println!("Importing {} waiting photos from {}", pending.len(), inbox.display());
    }
    for path in &pending {
        ingest(&journal, &settings, path, timestamp)?;
    }

    let Some(inbox_watcher) = inbox_watcher.as_mut() else {
        return Ok(());
    };

    println!("{} {}", "Watching".bold(), inbox.display().to_string().cyan());
    println!("  {}", "Press Ctrl+C to stop".dimmed());

    loop {
        tokio::select! {
            next = inbox_watcher.next() => {
                let Some(path) = next else {
                    tracing::warn!("Inbox watcher stopped");
                    break;
                };
                // Already imported and removed by an earlier event
                if !path.exists() {
                    continue;
                }
                ingest(&journal, &settings, &path, timestamp)?;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Stopped watching");
                break;
            }
        }
    }

    Ok(())
}

/// Import one inbox file, enforce limits, then drop it from the inbox.
///
/// A file that cannot be read is reported and left in place; a failed
/// retention batch stops the watch.
fn ingest(
    store: &dyn PhotoStore,
    settings: &Settings,
    path: &Path,
    timestamp: TimestampSource,
) -> Result<()> {
    match import_file(store, path, timestamp) {
        Ok(Some(_)) => {
            std::fs::remove_file(path)
                .with_context(|| format!("Failed to remove {} from inbox", path.display()))?;
            enforce_if_enabled(store, settings)
        }
        Ok(None) => Ok(()),
        Err(e) => {
            println!("{} {:#}", "✗".red(), e);
            Ok(())
        }
    }
}
