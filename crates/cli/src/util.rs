//! Shared utilities for CLI commands

use anyhow::Result;
use chrono::{Local, TimeZone};
use journal::BatchError;
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};

/// Format timestamp as relative time ("2 hours ago")
pub fn format_relative_time(ts_ms: u64) -> String {
    let now_ms = pl_core::record::now_ms();
    if ts_ms > now_ms {
        return "in the future".to_string();
    }

    let seconds = (now_ms - ts_ms) / 1000;
    if seconds < 60 {
        format!("{} seconds ago", seconds)
    } else if seconds < 3600 {
        format!("{} minutes ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{} hours ago", seconds / 3600)
    } else if seconds < 604800 {
        format!("{} days ago", seconds / 86400)
    } else {
        format!("{} weeks ago", seconds / 604800)
    }
}

fn local(ts_ms: u64) -> Option<chrono::DateTime<Local>> {
    Local.timestamp_millis_opt(ts_ms as i64).single()
}

/// Local date ("2024-01-03")
pub fn format_date(ts_ms: u64) -> String {
    local(ts_ms).map_or_else(|| ts_ms.to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}

/// Local time of day ("14:30")
pub fn format_time(ts_ms: u64) -> String {
    local(ts_ms).map_or_else(|| ts_ms.to_string(), |dt| dt.format("%H:%M").to_string())
}

/// Local date and time ("2024-01-03 14:30:00")
pub fn format_absolute_time(ts_ms: u64) -> String {
    local(ts_ms).map_or_else(
        || ts_ms.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

/// Format file size in human-readable format
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Ask a yes/no question on stdin; anything but y/yes is "no"
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Report how far a failed batch got, then turn it into an error
pub fn batch_failure(what: &str, err: BatchError) -> anyhow::Error {
    println!(
        "{} {} stopped early: removed {} photos, freed {}",
        "✗".red(),
        what,
        err.removed_ids.len(),
        format_size(err.freed_bytes)
    );
    anyhow::Error::new(err).context(format!("{} failed", what))
}
