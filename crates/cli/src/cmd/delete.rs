//! Delete one photo

use crate::library::Library;
use crate::{system_config, util};
use anyhow::{Context, Result};
use journal::PhotoStore;
use owo_colors::OwoColorize;
use pl_core::PhotoId;
use std::path::Path;

pub async fn run(library: Option<&Path>, id: u64, yes: bool) -> Result<()> {
    let library = Library::locate(library)?;
    let settings = system_config::load(&library)?;
    let journal = library.open_journal()?;

    let id = PhotoId::new(id);
    let photo = journal
        .get(id)
        .context("Failed to read photo")?
        .with_context(|| format!("Photo {} not found", id))?;

    if settings.gallery.confirm_delete && !yes {
        let prompt = format!(
            "Delete photo #{} ({}, {})?",
            id,
            util::format_absolute_time(photo.created_at),
            util::format_size(photo.byte_size())
        );
        if !util::confirm(&prompt)? {
            println!("Cancelled");
            return Ok(());
        }
    }

    journal
        .delete(id)
        .with_context(|| format!("Failed to delete photo {}", id))?;

    println!(
        "{} Deleted photo {} ({})",
        "✓".green(),
        format!("#{}", id).yellow(),
        util::format_size(photo.byte_size())
    );
    Ok(())
}
