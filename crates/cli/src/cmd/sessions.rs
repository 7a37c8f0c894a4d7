//! List photo sessions, newest first

use crate::library::Library;
use crate::{system_config, util};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use pl_core::{build_sessions, find_session, resolve_active, Session, SessionKey};
use std::path::Path;

pub async fn run(
    library: Option<&Path>,
    selected: Option<SessionKey>,
    all: bool,
    json: bool,
) -> Result<()> {
    let library = Library::locate(library)?;
    let settings = system_config::load(&library)?;
    let store = library.open_store_for_reading();

    let records = store.list_headers().context("Failed to list photos")?;
    let sessions = build_sessions(&records, settings.session_gap_ms());
    let active = resolve_active(&sessions, selected);

    if json {
        let value: Vec<_> = sessions
            .iter()
            .enumerate()
            .map(|(idx, s)| {
                serde_json::json!({
                    "key": s.key(),
                    "start_ms": s.start,
                    "end_ms": s.end(),
                    "count": s.len(),
                    "bytes": s.total_bytes(),
                    "active": Some(idx) == active,
                    "photo_ids": s.photos.iter().filter_map(|p| p.id.map(|id| id.get())).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let Some(active) = active else {
        println!("{}", "No photos yet".dimmed());
        println!("  {}", "Tip: Add some with 'pl import <files>'".dimmed());
        return Ok(());
    };

    if let Some(key) = selected {
        if find_session(&sessions, key).is_none() {
            println!(
                "{}",
                format!("No session starts at {}; showing the closest one", key).yellow()
            );
        }
    }

    println!(
        "{} ({} photos, gap {} min)",
        "Sessions".bold(),
        records.len(),
        settings.session.gap_minutes
    );
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for (idx, session) in sessions.iter().enumerate() {
        let is_active = idx == active;
        print_session_line(session, is_active);
        if is_active || all {
            print_members(session);
        }
    }

    Ok(())
}

fn print_session_line(session: &Session, is_active: bool) {
    let marker = if is_active { "▶".green().to_string() } else { " ".to_string() };
    let time_range = if session.len() == 1 {
        util::format_time(session.start)
    } else {
        format!("{}–{}", util::format_time(session.start), util::format_time(session.end()))
    };
    let count = if session.len() == 1 {
        "1 photo".to_string()
    } else {
        format!("{} photos", session.len())
    };

    println!(
        "{} {}  {:<13}  {:>10}  {}",
        marker,
        util::format_date(session.start).cyan(),
        time_range,
        count,
        format!("key {}", session.key()).dimmed()
    );
}

fn print_members(session: &Session) {
    for photo in &session.photos {
        let id = photo
            .id
            .map(|id| format!("#{}", id))
            .unwrap_or_else(|| "unsaved".to_string());
        println!(
            "      {:<8} {}  {}",
            id.yellow().to_string(),
            util::format_absolute_time(photo.created_at),
            util::format_size(photo.byte_size()).dimmed()
        );
    }
}
