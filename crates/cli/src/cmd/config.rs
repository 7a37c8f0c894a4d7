//! Configuration management command
//!
//! Provides CLI interface to view and edit library settings.

use crate::library::Library;
use crate::system_config;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use pl_core::settings::{SESSION_GAP_MINUTES_RANGE, MAX_PHOTOS_RANGE, MAX_STORAGE_MB_RANGE};
use pl_core::Settings;
use std::path::Path;

/// List all settings
pub async fn run_list(library: Option<&Path>) -> Result<()> {
    let library = Library::locate(library)?;
    let settings = system_config::load(&library)?;

    println!("{}", "Library Settings".bold());
    println!("{}: {}\n", "Location".dimmed(), library.config_path().display().dimmed());

    println!("{}", "[session]".yellow());
    println!(
        "  {} = {} {}",
        "gap_minutes".cyan(),
        settings.session.gap_minutes,
        format!("({} min between sessions)", settings.session.gap_minutes).dimmed()
    );

    println!("\n{}", "[retention]".yellow());
    println!("  {} = {}", "max_photos".cyan(), settings.retention.max_photos);
    println!(
        "  {} = {} {}",
        "max_storage_mb".cyan(),
        settings.retention.max_storage_mb,
        format!("({} bytes)", settings.max_bytes()).dimmed()
    );
    println!("  {} = {}", "auto_enforce".cyan(), settings.retention.auto_enforce);

    println!("\n{}", "[gallery]".yellow());
    println!("  {} = {}", "confirm_delete".cyan(), settings.gallery.confirm_delete);

    println!("\n{}", "Valid Ranges:".bold());
    println!("  gap_minutes: {}-{}", SESSION_GAP_MINUTES_RANGE.start(), SESSION_GAP_MINUTES_RANGE.end());
    println!("  max_photos: {}-{}", MAX_PHOTOS_RANGE.start(), MAX_PHOTOS_RANGE.end());
    println!(
        "  max_storage_mb: {}-{}",
        MAX_STORAGE_MB_RANGE.start(),
        MAX_STORAGE_MB_RANGE.end()
    );

    Ok(())
}

/// Get a single setting
pub async fn run_get(library: Option<&Path>, key: &str) -> Result<()> {
    let library = Library::locate(library)?;
    let settings = system_config::load(&library)?;

    let value = settings.get(key).with_context(|| {
        format!("Use one of: {}", Settings::KEYS.join(", "))
    })?;

    println!("{}", value);
    Ok(())
}

/// Set a single setting; out-of-range values are rejected
pub async fn run_set(library: Option<&Path>, key: &str, value: &str) -> Result<()> {
    let library = Library::locate(library)?;
    let mut settings = system_config::load(&library)?;

    settings.set(key, value)?;
    system_config::save(&library, &settings)?;

    println!("{} Set {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Restore defaults
pub async fn run_reset(library: Option<&Path>) -> Result<()> {
    let library = Library::locate(library)?;
    system_config::reset(&library)?;

    println!("{} Settings reset to defaults", "✓".green());
    println!("{}: {}", "Location".dimmed(), library.config_path().display());
    Ok(())
}

/// Show config file path
pub async fn run_path(library: Option<&Path>) -> Result<()> {
    let library = Library::locate(library)?;
    println!("{}", library.config_path().display());
    Ok(())
}

/// Print example config file
pub async fn run_example() -> Result<()> {
    print!("{}", system_config::example_config());
    Ok(())
}
