//! Per-path debouncing logic
//!
//! Cameras and copy tools write a photo in several chunks; a path is only
//! released once no event has been seen for it for the configured delay.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Per-path quiet-period tracker
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: HashMap<PathBuf, Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    /// Record an event for `path`, restarting its quiet period
    pub fn push(&mut self, path: PathBuf, now: Instant) {
        self.pending.insert(path, now);
    }

    /// Remove and return paths that have been quiet for at least the delay,
    /// sorted for a stable import order
    pub fn drain_ready(&mut self, now: Instant) -> Vec<PathBuf> {
        let delay = self.delay;
        let mut ready: Vec<PathBuf> = self
            .pending
            .iter()
            .filter(|(_, seen)| now.saturating_duration_since(**seen) >= delay)
            .map(|(path, _)| path.clone())
            .collect();

        for path in &ready {
            self.pending.remove(path);
        }
        ready.sort();
        ready
    }

    /// Remove and return everything still pending
    pub fn drain_all(&mut self) -> Vec<PathBuf> {
        let mut all: Vec<PathBuf> = self.pending.drain().map(|(path, _)| path).collect();
        all.sort();
        all
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
