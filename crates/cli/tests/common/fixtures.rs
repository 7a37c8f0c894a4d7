//! Throwaway photo libraries for integration tests

use anyhow::Result;
use filetime::{set_file_mtime, FileTime};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::TempDir;

/// Seconds in one day
pub const DAY_SECS: i64 = 24 * 60 * 60;

/// A temporary directory that becomes a library after `pl init`
pub struct TestLibrary {
    dir: TempDir,
}

impl TestLibrary {
    /// Empty directory; run `pl init` in it to create the library
    pub fn new() -> Result<Self> {
        Ok(Self { dir: TempDir::new()? })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write an image file whose mtime is `unix_secs`
    pub fn write_photo(&self, name: &str, bytes: &[u8], unix_secs: i64) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, bytes)?;
        set_file_mtime(&path, FileTime::from_unix_time(unix_secs, 0))?;
        Ok(path)
    }

    /// Write a file with a "now" mtime
    pub fn write_file(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        self.write_photo(name, bytes, now_secs())
    }
}

pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
