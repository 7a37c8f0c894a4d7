//! CLI command execution helpers with automatic timing
//!
//! This module provides a wrapper around the `pl` CLI binary that
//! automatically measures execution time and provides convenient
//! assertion methods.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

/// CLI command builder with timing
pub struct PlCommand {
    binary_path: PathBuf,
    working_dir: PathBuf,
    args: Vec<String>,
    stdin_data: Option<String>,
}

impl PlCommand {
    /// Create a new command in the given working directory
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            binary_path: find_pl_binary(),
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
            stdin_data: None,
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Provide stdin data
    pub fn stdin(&mut self, data: &str) -> &mut Self {
        self.stdin_data = Some(data.to_string());
        self
    }

    /// Execute command and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();

        let mut command = Command::new(&self.binary_path);
        command
            .args(&self.args)
            .current_dir(&self.working_dir);

        // Handle stdin if provided
        if self.stdin_data.is_some() {
            use std::process::Stdio;
            command.stdin(Stdio::piped());
        }

        let output = if let Some(stdin_str) = &self.stdin_data {
            // Spawn process with stdin
            let mut child = command
                .stdout(std::process::Stdio::piped())
                .stderr(std::process::Stdio::piped())
                .spawn()
                .context("Failed to spawn command")?;

            // Write stdin
            if let Some(mut stdin) = child.stdin.take() {
                use std::io::Write;
                stdin.write_all(stdin_str.as_bytes())?;
            }

            // Wait for completion
            child.wait_with_output()
                .context("Failed to wait for command")?
        } else {
            // Simple execution without stdin
            command.output()
                .context("Failed to execute command")?
        };

        let elapsed = start.elapsed();

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: elapsed,
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandResult {
    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Parse stdout as JSON (for `--json` output)
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.stdout)
            .with_context(|| format!("stdout is not JSON:\n{}", self.stdout))
    }

    /// Photo ids printed as `#<id>`, in output order
    pub fn photo_ids(&self) -> Vec<u64> {
        self.stdout
            .lines()
            .filter_map(extract_photo_id)
            .collect()
    }
}

/// Extract the first `#<digits>` token from a line of text
pub fn extract_photo_id(line: &str) -> Option<u64> {
    let start = line.find('#')? + 1;
    let digits: String = line[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Find the pl binary in the target directory
fn find_pl_binary() -> PathBuf {
    // Cargo sets this for integration tests of packages with binaries
    if let Some(path) = option_env!("CARGO_BIN_EXE_pl") {
        return PathBuf::from(path);
    }

    // Try to locate the binary relative to the current executable (test binary)
    let mut path = std::env::current_exe().expect("Failed to get current exe path");

    // Go up from test binary location
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps/

    // Try debug first, then release
    let debug_bin = path.join("pl");
    if debug_bin.exists() {
        return debug_bin;
    }

    // Try release
    path.pop(); // Remove debug/
    let release_bin = path.join("release").join("pl");
    if release_bin.exists() {
        return release_bin;
    }

    // Fallback to debug
    path.join("debug").join("pl")
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// pl!(dir, "init").assert_success()?;
/// pl!(dir, "delete", "3").stdin("y\n").assert_success()?;
/// ```
#[macro_export]
macro_rules! pl {
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::PlCommand::new($dir);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_id_extraction() {
        assert_eq!(extract_photo_id("✓ Photo #12 (3 B) from a.jpg"), Some(12));
        assert_eq!(extract_photo_id("no id here"), None);
        assert_eq!(extract_photo_id("#x"), None);
    }

    #[test]
    fn test_photo_ids_in_order() {
        let result = CommandResult {
            stdout: "✓ Photo #1 (3 B)\n✓ Photo #2 (3 B)\nImported 2 photos".to_string(),
            stderr: String::new(),
            exit_code: 0,
            duration: Duration::from_millis(10),
        };
        assert!(result.success());
        assert_eq!(result.photo_ids(), vec![1, 2]);
    }
}
