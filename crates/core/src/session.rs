//! Session building: partition photos into bursts separated by a time gap
//!
//! Sessions are derived and never persisted. They are rebuilt from the full
//! record collection on every render, so a positional index is not a stable
//! reference; use [`SessionKey`] (the session start) instead.

use crate::PhotoRecord;

/// Stable reference to a session across rebuilds: its start timestamp
pub type SessionKey = u64;

/// A group of photos whose consecutive captures are within the gap threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// `created_at` of the earliest member
    pub start: u64,
    /// Members, newest first
    pub photos: Vec<PhotoRecord>,
}

impl Session {
    pub fn key(&self) -> SessionKey {
        self.start
    }

    /// `created_at` of the newest member
    pub fn end(&self) -> u64 {
        self.photos.first().map_or(self.start, |p| p.created_at)
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.photos.iter().map(PhotoRecord::byte_size).sum()
    }

    fn contains_time(&self, ts: u64) -> bool {
        self.start <= ts && ts <= self.end()
    }
}

/// Partition `records` into sessions.
///
/// Records are walked in chronological order; a new session starts whenever
/// a record is more than `gap_ms` after its immediate predecessor (a gap of
/// exactly `gap_ms` stays in the same session). Members are returned newest
/// first and sessions are ordered newest first.
///
/// Equal timestamps are ordered by id (unsaved records first), then by input
/// position, so the output is reproducible for a given input.
pub fn build_sessions(records: &[PhotoRecord], gap_ms: u64) -> Vec<Session> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&PhotoRecord> = records.iter().collect();
    sorted.sort_by_key(|r| (r.created_at, r.id));

    let mut sessions = Vec::new();
    let mut current = vec![sorted[0].clone()];

    for pair in sorted.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        if cur.created_at - prev.created_at > gap_ms {
            sessions.push(close_session(std::mem::take(&mut current)));
        }
        current.push(cur.clone());
    }
    sessions.push(close_session(current));

    // Starts are strictly increasing, so reversing yields newest first
    sessions.reverse();
    sessions
}

fn close_session(mut chronological: Vec<PhotoRecord>) -> Session {
    let start = chronological[0].created_at;
    chronological.reverse();
    Session {
        start,
        photos: chronological,
    }
}

/// Look up a session by key
pub fn find_session(sessions: &[Session], key: SessionKey) -> Option<&Session> {
    sessions.iter().find(|s| s.start == key)
}

/// Re-resolve a selection after sessions were rebuilt.
///
/// Prefers the session with the same start, then the session whose time span
/// covers the old start, then the session starting nearest to it (its
/// earliest photo was deleted). Without a selection the newest session is
/// active. Returns `None` only when there are no sessions.
pub fn resolve_active(sessions: &[Session], selected: Option<SessionKey>) -> Option<usize> {
    if sessions.is_empty() {
        return None;
    }

    let Some(key) = selected else {
        return Some(0);
    };

    sessions
        .iter()
        .position(|s| s.start == key)
        .or_else(|| sessions.iter().position(|s| s.contains_time(key)))
        .or_else(|| {
            sessions
                .iter()
                .enumerate()
                .min_by_key(|(_, s)| s.start.abs_diff(key))
                .map(|(idx, _)| idx)
        })
}
