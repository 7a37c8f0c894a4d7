//! Show photo count and storage usage

use crate::library::Library;
use crate::{system_config, util};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use pl_core::compute_totals;
use std::path::Path;

pub async fn run(library: Option<&Path>, json: bool) -> Result<()> {
    let library = Library::locate(library)?;
    let settings = system_config::load(&library)?;
    let store = library.open_store_for_reading();

    let records = store.list_headers().context("Failed to list photos")?;
    let totals = compute_totals(&records);

    let max_photos = settings.max_photos();
    let max_bytes = settings.max_bytes();
    let newest = records.iter().map(|r| r.created_at).max();
    let oldest = records.iter().map(|r| r.created_at).min();

    if json {
        let value = serde_json::json!({
            "count": totals.count,
            "total_bytes": totals.bytes,
            "avg_bytes": totals.avg_bytes,
            "max_photos": max_photos,
            "max_bytes": max_bytes,
            "oldest_ms": oldest,
            "newest_ms": newest,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Library Statistics".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    println!("Library:       {}", library.root().display().to_string().cyan());
    println!();
    println!("Photos:        {}", totals.count.to_string().yellow());
    println!("Total size:    {}", util::format_size(totals.bytes));
    println!("Average size:  {}", util::format_size(totals.avg_bytes.round() as u64));

    if let (Some(oldest), Some(newest)) = (oldest, newest) {
        println!();
        println!(
            "Oldest:        {} ({})",
            util::format_absolute_time(oldest),
            util::format_relative_time(oldest).dimmed()
        );
        println!(
            "Newest:        {} ({})",
            util::format_absolute_time(newest),
            util::format_relative_time(newest).dimmed()
        );
    }

    println!();
    println!("{}", "Limits:".bold());
    println!(
        "  Photos:      {} / {} ({})",
        totals.count,
        max_photos,
        usage(totals.count as f64, max_photos as f64)
    );
    println!(
        "  Storage:     {} / {} ({})",
        util::format_size(totals.bytes),
        util::format_size(max_bytes),
        usage(totals.bytes as f64, max_bytes as f64)
    );
    if !settings.retention.auto_enforce {
        println!("  {}", "Automatic enforcement is off; run 'pl enforce'".dimmed());
    }

    Ok(())
}

fn usage(used: f64, limit: f64) -> String {
    let percent = if limit > 0.0 { used / limit * 100.0 } else { 0.0 };
    let text = format!("{:.1}%", percent);
    if percent > 100.0 {
        text.red().to_string()
    } else if percent > 90.0 {
        text.yellow().to_string()
    } else {
        text.green().to_string()
    }
}
