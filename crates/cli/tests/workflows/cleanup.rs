//! Time-windowed cleanup through the CLI

use crate::common::fixtures::{now_secs, DAY_SECS};
use crate::common::TestLibrary;
use crate::pl;
use anyhow::Result;

/// One photo from two years ago, one from today
fn library_with_old_and_new() -> Result<TestLibrary> {
    let lib = TestLibrary::new()?;
    pl!(lib.path(), "init").assert_success()?;

    let old = lib.write_photo("old.jpg", b"old photo", now_secs() - 730 * DAY_SECS)?;
    let new = lib.write_photo("new.jpg", b"new", now_secs())?;
    pl!(
        lib.path(),
        "import",
        "--timestamp",
        "mtime",
        old.to_str().unwrap(),
        new.to_str().unwrap()
    )
    .assert_success()?;
    Ok(lib)
}

#[test]
fn test_cleanup_removes_old_photos() -> Result<()> {
    let lib = library_with_old_and_new()?;

    let result = pl!(lib.path(), "cleanup", "--months", "1", "-y").assert_success()?;
    assert!(result.contains_stdout("50.0 %"));

    let stats = pl!(lib.path(), "stats", "--json").assert_success()?.json()?;
    assert_eq!(stats["count"], 1);
    assert_eq!(stats["total_bytes"], 3);
    Ok(())
}

#[test]
fn test_cleanup_window_larger_than_history() -> Result<()> {
    let lib = library_with_old_and_new()?;

    let result = pl!(lib.path(), "cleanup", "--months", "60", "-y").assert_success()?;
    assert!(result.contains_stdout("No photos older than 60 months"));

    let stats = pl!(lib.path(), "stats", "--json").assert_success()?.json()?;
    assert_eq!(stats["count"], 2);
    Ok(())
}

#[test]
fn test_cleanup_declined() -> Result<()> {
    let lib = library_with_old_and_new()?;

    let result = pl!(lib.path(), "cleanup", "--months", "1")
        .stdin("n\n")
        .assert_success()?;
    assert!(result.contains_stdout("Cancelled"));

    let stats = pl!(lib.path(), "stats", "--json").assert_success()?.json()?;
    assert_eq!(stats["count"], 2);
    Ok(())
}

#[test]
fn test_cleanup_rejects_non_positive_months() -> Result<()> {
    let lib = library_with_old_and_new()?;

    for months in ["0", "-1"] {
        let result = pl!(lib.path(), "cleanup", "--months", months, "-y").assert_failure()?;
        assert!(result.contains_stderr("positive"));
    }

    let stats = pl!(lib.path(), "stats", "--json").assert_success()?.json()?;
    assert_eq!(stats["count"], 2);
    Ok(())
}

#[test]
fn test_cleanup_validates_before_opening_library() -> Result<()> {
    // Not a library at all: the month count is still what gets reported
    let dir = TestLibrary::new()?;
    let result = pl!(dir.path(), "cleanup", "--months", "0").assert_failure()?;
    assert!(result.contains_stderr("positive"));
    Ok(())
}
