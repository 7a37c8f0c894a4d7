//! Session grouping through the CLI

use crate::common::TestLibrary;
use crate::pl;
use anyhow::Result;
use serde_json::json;

const BASE_SECS: i64 = 1_700_000_000;

/// Three photos: two minutes apart, then a half-hour break
fn library_with_two_sessions() -> Result<TestLibrary> {
    let lib = TestLibrary::new()?;
    pl!(lib.path(), "init").assert_success()?;

    let a = lib.write_photo("a.jpg", b"a", BASE_SECS)?;
    let b = lib.write_photo("b.jpg", b"bb", BASE_SECS + 120)?;
    let c = lib.write_photo("c.jpg", b"ccc", BASE_SECS + 1920)?;
    pl!(
        lib.path(),
        "import",
        "--timestamp",
        "mtime",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        c.to_str().unwrap()
    )
    .assert_success()?;
    Ok(lib)
}

#[test]
fn test_sessions_split_on_gap() -> Result<()> {
    let lib = library_with_two_sessions()?;

    let sessions = pl!(lib.path(), "sessions", "--json").assert_success()?.json()?;
    let sessions = sessions.as_array().unwrap();
    assert_eq!(sessions.len(), 2);

    // Newest first, members newest first
    assert_eq!(sessions[0]["start_ms"], (BASE_SECS + 1920) * 1000);
    assert_eq!(sessions[0]["photo_ids"], json!([3]));
    assert_eq!(sessions[1]["start_ms"], BASE_SECS * 1000);
    assert_eq!(sessions[1]["end_ms"], (BASE_SECS + 120) * 1000);
    assert_eq!(sessions[1]["photo_ids"], json!([2, 1]));
    assert_eq!(sessions[1]["bytes"], 3);

    // Newest session is active by default
    assert_eq!(sessions[0]["active"], true);
    assert_eq!(sessions[1]["active"], false);
    Ok(())
}

#[test]
fn test_session_selected_by_start() -> Result<()> {
    let lib = library_with_two_sessions()?;
    let key = (BASE_SECS * 1000).to_string();

    let sessions = pl!(lib.path(), "sessions", "--session", &key, "--json")
        .assert_success()?
        .json()?;
    assert_eq!(sessions[0]["active"], false);
    assert_eq!(sessions[1]["active"], true);

    // Selected session is expanded in the listing
    let listing = pl!(lib.path(), "sessions", "--session", &key).assert_success()?;
    assert_eq!(listing.photo_ids(), vec![2, 1]);
    assert!(!listing.contains_stdout("No session starts at"));
    Ok(())
}

#[test]
fn test_selection_survives_deleting_first_photo() -> Result<()> {
    let lib = library_with_two_sessions()?;
    let key = (BASE_SECS * 1000).to_string();

    pl!(lib.path(), "delete", "1").assert_success()?;

    // The old start no longer exists; the session that lost its first
    // photo stays selected
    let sessions = pl!(lib.path(), "sessions", "--session", &key, "--json")
        .assert_success()?
        .json()?;
    assert_eq!(sessions[1]["photo_ids"], json!([2]));
    assert_eq!(sessions[1]["active"], true);

    let listing = pl!(lib.path(), "sessions", "--session", &key).assert_success()?;
    assert!(listing.contains_stdout("No session starts at"));
    assert_eq!(listing.photo_ids(), vec![2]);
    Ok(())
}

#[test]
fn test_wider_gap_merges_sessions() -> Result<()> {
    let lib = library_with_two_sessions()?;
    pl!(lib.path(), "config", "set", "session.gap_minutes", "60").assert_success()?;

    let sessions = pl!(lib.path(), "sessions", "--json").assert_success()?.json()?;
    let sessions = sessions.as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["count"], 3);
    Ok(())
}

#[test]
fn test_no_sessions_in_empty_library() -> Result<()> {
    let lib = TestLibrary::new()?;
    pl!(lib.path(), "init").assert_success()?;

    let sessions = pl!(lib.path(), "sessions", "--json").assert_success()?.json()?;
    assert_eq!(sessions, json!([]));

    let listing = pl!(lib.path(), "sessions").assert_success()?;
    assert!(listing.contains_stdout("No photos yet"));
    Ok(())
}
