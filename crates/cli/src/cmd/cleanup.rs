//! Delete photos older than a number of months

use crate::library::Library;
use crate::util;
use anyhow::{Context, Result};
use journal::{cleanup_older_than, cutoff_ms, plan_cleanup, AgeMonths, CleanupReport, PhotoStore};
use owo_colors::OwoColorize;
use pl_core::record::now_ms;
use std::path::Path;

pub async fn run(library: Option<&Path>, months: i64, yes: bool) -> Result<()> {
    // Reject bad input before touching storage
    let months = AgeMonths::new(months)?;

    let library = Library::locate(library)?;
    let journal = library.open_journal()?;

    let now = now_ms();
    let cutoff = cutoff_ms(now, months);
    let records = journal.list_headers().context("Failed to list photos")?;

    let doomed = plan_cleanup(&records, months, now);
    if doomed.is_empty() {
        println!(
            "{}",
            format!("No photos older than {} months", months.get()).dimmed()
        );
        return Ok(());
    }

    let doomed_bytes: u64 = doomed.iter().map(|r| r.byte_size()).sum();
    println!(
        "{} of {} photos were taken before {} ({})",
        doomed.len().to_string().yellow(),
        records.len(),
        util::format_date(cutoff),
        util::format_size(doomed_bytes)
    );

    if !yes && !util::confirm("Delete them?")? {
        println!("Cancelled");
        return Ok(());
    }

    let report = cleanup_older_than(&journal, &records, months, now)
        .map_err(|e| util::batch_failure("Cleanup", e))?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &CleanupReport) {
    println!();
    println!("{}", "Cleanup Complete".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "Photos removed:   {} of {} ({:.1} %)",
        report.removed_count().to_string().yellow(),
        report.total_count,
        report.removed_percent
    );
    println!("Space freed:      {}", util::format_size(report.freed_bytes).green());
}
