//! Apply the retention limits now

use crate::library::Library;
use crate::{system_config, util};
use anyhow::Result;
use journal::{EnforcementReport, RetentionEnforcer, RetentionPolicy};
use owo_colors::OwoColorize;
use std::path::Path;

pub async fn run(library: Option<&Path>) -> Result<()> {
    let library = Library::locate(library)?;
    let settings = system_config::load(&library)?;
    let journal = library.open_journal()?;

    let enforcer = RetentionEnforcer::new(RetentionPolicy::from_settings(&settings));
    let policy = enforcer.policy();

    println!("{}", "Enforcing Retention Limits...".bold());
    println!(
        "Limits: {} photos, {}",
        policy.max_count,
        util::format_size(policy.max_bytes)
    );
    println!();

    let report = enforcer
        .enforce_store(&journal)
        .map_err(|e| util::batch_failure("Retention", e))?;

    if report.removed_count() == 0 {
        println!("{}", "Library is already within its limits".dimmed());
        println!(
            "Photos: {}  Storage: {}",
            report.remaining_count,
            util::format_size(report.remaining_bytes)
        );
    } else {
        print_report(&report);
    }

    Ok(())
}

pub fn print_report(report: &EnforcementReport) {
    println!("{}", "Retention Complete".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Photos removed:   {}", report.removed_count().to_string().yellow());
    println!("Space freed:      {}", util::format_size(report.freed_bytes).green());
    println!(
        "Remaining:        {} photos, {}",
        report.remaining_count,
        util::format_size(report.remaining_bytes)
    );
}
