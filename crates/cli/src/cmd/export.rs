//! Write a photo's image data to a file

use crate::library::Library;
use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use pl_core::PhotoId;
use std::path::Path;

pub async fn run(library: Option<&Path>, id: u64, output: &Path) -> Result<()> {
    let library = Library::locate(library)?;
    let store = library.open_store_for_reading();

    let id = PhotoId::new(id);
    let photo = store
        .get(id)
        .context("Failed to read photo")?
        .with_context(|| format!("Photo {} not found", id))?;

    let payload = photo.payload.unwrap_or_default();
    tokio::fs::write(output, &payload)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} Exported photo {} ({}) to {}",
        "✓".green(),
        format!("#{}", id).yellow(),
        util::format_size(payload.len() as u64),
        output.display()
    );
    Ok(())
}
