//! Retention limits applied on import and on demand

use crate::common::TestLibrary;
use crate::pl;
use anyhow::Result;
use std::path::PathBuf;

const BASE_SECS: i64 = 1_700_000_000;

/// `count` one-byte photos, one second apart, oldest first
fn write_photos(lib: &TestLibrary, count: i64) -> Result<Vec<String>> {
    (0..count)
        .map(|i| -> Result<String> {
            let path: PathBuf = lib.write_photo(&format!("in/{:04}.jpg", i), b"x", BASE_SECS + i)?;
            Ok(path.to_string_lossy().into_owned())
        })
        .collect()
}

fn import(lib: &TestLibrary, files: &[String]) -> Result<crate::common::cli::CommandResult> {
    let mut cmd = crate::common::cli::PlCommand::new(lib.path());
    cmd.args(&["import", "--timestamp", "mtime"]);
    let refs: Vec<&str> = files.iter().map(String::as_str).collect();
    cmd.args(&refs);
    cmd.assert_success()
}

fn count(lib: &TestLibrary) -> Result<u64> {
    let stats = pl!(lib.path(), "stats", "--json").assert_success()?.json()?;
    Ok(stats["count"].as_u64().unwrap_or_default())
}

#[test]
fn test_import_evicts_oldest_over_count_limit() -> Result<()> {
    let lib = TestLibrary::new()?;
    pl!(lib.path(), "init").assert_success()?;
    pl!(lib.path(), "config", "set", "retention.max_photos", "100").assert_success()?;

    let files = write_photos(&lib, 101)?;
    let result = import(&lib, &files)?;
    assert!(result.contains_stdout("Retention Complete"));

    assert_eq!(count(&lib)?, 100);

    // Photo 1 was the oldest
    let out = lib.path().join("out.jpg");
    pl!(lib.path(), "export", "1", out.to_str().unwrap()).assert_failure()?;
    pl!(lib.path(), "export", "2", out.to_str().unwrap()).assert_success()?;

    // Nothing left to do
    let again = pl!(lib.path(), "enforce").assert_success()?;
    assert!(again.contains_stdout("already within its limits"));
    assert_eq!(count(&lib)?, 100);
    Ok(())
}

#[test]
fn test_manual_enforce_when_auto_is_off() -> Result<()> {
    let lib = TestLibrary::new()?;
    pl!(lib.path(), "init").assert_success()?;
    pl!(lib.path(), "config", "set", "retention.max_photos", "100").assert_success()?;
    pl!(lib.path(), "config", "set", "retention.auto_enforce", "false").assert_success()?;

    let files = write_photos(&lib, 103)?;
    import(&lib, &files)?;
    assert_eq!(count(&lib)?, 103);

    let result = pl!(lib.path(), "enforce").assert_success()?;
    assert!(result.contains_stdout("Retention Complete"));
    assert_eq!(count(&lib)?, 100);
    Ok(())
}

#[test]
fn test_under_limits_keeps_everything() -> Result<()> {
    let lib = TestLibrary::new()?;
    pl!(lib.path(), "init").assert_success()?;

    let files = write_photos(&lib, 5)?;
    let result = import(&lib, &files)?;
    assert!(!result.contains_stdout("Retention Complete"));
    assert_eq!(count(&lib)?, 5);
    Ok(())
}
