//! Settings editing through the CLI

use crate::common::TestLibrary;
use crate::pl;
use anyhow::Result;

#[test]
fn test_get_set_reset() -> Result<()> {
    let lib = TestLibrary::new()?;
    pl!(lib.path(), "init").assert_success()?;

    let value = pl!(lib.path(), "config", "get", "session.gap_minutes").assert_success()?;
    assert_eq!(value.stdout.trim(), "10");

    pl!(lib.path(), "config", "set", "session.gap_minutes", "25").assert_success()?;
    let value = pl!(lib.path(), "config", "get", "session.gap_minutes").assert_success()?;
    assert_eq!(value.stdout.trim(), "25");

    pl!(lib.path(), "config", "reset").assert_success()?;
    let value = pl!(lib.path(), "config", "get", "session.gap_minutes").assert_success()?;
    assert_eq!(value.stdout.trim(), "10");
    Ok(())
}

#[test]
fn test_set_rejects_out_of_range() -> Result<()> {
    let lib = TestLibrary::new()?;
    pl!(lib.path(), "init").assert_success()?;

    let result = pl!(lib.path(), "config", "set", "retention.max_photos", "50").assert_failure()?;
    assert!(result.contains_stderr("100-5000"));

    let result = pl!(lib.path(), "config", "set", "retention.max_storage_mb", "4096").assert_failure()?;
    assert!(result.contains_stderr("100-2000"));

    pl!(lib.path(), "config", "set", "session.gap_minutes", "abc").assert_failure()?;
    pl!(lib.path(), "config", "set", "no.such_key", "1").assert_failure()?;

    let value = pl!(lib.path(), "config", "get", "retention.max_photos").assert_success()?;
    assert_eq!(value.stdout.trim(), "1000");
    Ok(())
}

#[test]
fn test_hand_edited_file_is_clamped() -> Result<()> {
    let lib = TestLibrary::new()?;
    pl!(lib.path(), "init").assert_success()?;

    let path = pl!(lib.path(), "config", "path").assert_success()?;
    std::fs::write(
        path.stdout.trim(),
        "[session]\ngap_minutes = 500\n[retention]\nmax_photos = 3\n",
    )?;

    let value = pl!(lib.path(), "config", "get", "session.gap_minutes").assert_success()?;
    assert_eq!(value.stdout.trim(), "60");
    let value = pl!(lib.path(), "config", "get", "retention.max_photos").assert_success()?;
    assert_eq!(value.stdout.trim(), "100");
    let value = pl!(lib.path(), "config", "get", "retention.max_storage_mb").assert_success()?;
    assert_eq!(value.stdout.trim(), "500");
    Ok(())
}

#[test]
fn test_example_is_printed() -> Result<()> {
    let lib = TestLibrary::new()?;
    let result = pl!(lib.path(), "config", "example").assert_success()?;
    assert!(result.contains_stdout("[retention]"));
    assert!(result.contains_stdout("gap_minutes = 10"));
    Ok(())
}
