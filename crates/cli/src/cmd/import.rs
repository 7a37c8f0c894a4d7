//! Import image files into the library

use crate::library::Library;
use crate::{system_config, util};
use anyhow::{Context, Result};
use journal::{PhotoStore, RetentionEnforcer, RetentionPolicy};
use owo_colors::OwoColorize;
use pl_core::{PhotoId, Settings};
use std::path::{Path, PathBuf};
use watcher::TimestampSource;

pub async fn run(library: Option<&Path>, files: &[PathBuf], timestamp: TimestampSource) -> Result<()> {
    let library = Library::locate(library)?;
    let settings = system_config::load(&library)?;
    let journal = library.open_journal()?;

    let mut imported = 0usize;
    let mut failed = 0usize;

    for path in files {
        if !watcher::is_image_path(path) {
            println!("{} Skipping {} (not an image)", "-".dimmed(), path.display());
            continue;
        }

        match import_file(&journal, path, timestamp) {
            Ok(Some(_)) => imported += 1,
            Ok(None) => {}
            Err(e) => {
                failed += 1;
                println!("{} {:#}", "✗".red(), e);
            }
        }
    }

    println!();
    println!("Imported {} photos", imported.to_string().green());

    if imported > 0 {
        enforce_if_enabled(&journal, &settings)?;
    }

    if failed > 0 {
        anyhow::bail!("{} files could not be imported", failed);
    }
    Ok(())
}

/// Read one file and store it, printing the new photo's id
pub fn import_file(
    store: &dyn PhotoStore,
    path: &Path,
    timestamp: TimestampSource,
) -> Result<Option<PhotoId>> {
    let capture = watcher::read_capture(path, timestamp)?;
    let size = capture.size();

    let id = store
        .insert(capture)
        .with_context(|| format!("Failed to store {}", path.display()))?;

    match id {
        Some(id) => {
            tracing::debug!("Imported {} as photo {}", path.display(), id);
            println!(
                "{} Photo {} ({}) from {}",
                "✓".green(),
                format!("#{}", id).yellow(),
                util::format_size(size),
                path.display()
            );
        }
        None => {
            println!("{} {} was not saved (storage unavailable)", "!".yellow(), path.display());
        }
    }

    Ok(id)
}

/// Apply the retention limits when `retention.auto_enforce` is on
pub fn enforce_if_enabled(store: &dyn PhotoStore, settings: &Settings) -> Result<()> {
    if !settings.retention.auto_enforce {
        return Ok(());
    }

    let enforcer = RetentionEnforcer::new(RetentionPolicy::from_settings(settings));
    match enforcer.enforce_store(store) {
        Ok(report) => {
            if report.removed_count() > 0 {
                super::enforce::print_report(&report);
            }
            Ok(())
        }
        Err(e) => Err(util::batch_failure("Retention", e)),
    }
}
