//! Inbox directory watcher

use crate::debounce::Debouncer;
use crate::reconcile::{scan_inbox, should_ignore};
use crate::is_image_path;
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Watches one directory and yields image paths once they stop changing.
///
/// Must be started from within a tokio runtime. Dropping the watcher stops
/// the underlying OS watch and the debounce task.
pub struct InboxWatcher {
    _watcher: RecommendedWatcher,
    ready_rx: mpsc::Receiver<PathBuf>,
}

impl InboxWatcher {
    /// Start watching `inbox` (non-recursive)
    pub fn start(inbox: &Path, delay: Duration) -> Result<Self> {
        let (raw_tx, raw_rx) = mpsc::unbounded_channel();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                    return;
                }
                for path in event.paths {
                    if is_image_path(&path) && !should_ignore(&path) {
                        // Receiver gone means we are shutting down
                        let _ = raw_tx.send(path);
                    }
                }
            }
            Err(e) => warn!("Inbox watch error: {}", e),
        })
        .context("Failed to create file watcher")?;

        watcher
            .watch(inbox, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", inbox.display()))?;

        let (ready_tx, ready_rx) = mpsc::channel(64);
        tokio::spawn(debounce_loop(raw_rx, ready_tx, delay));

        debug!("Watching inbox {} (debounce {:?})", inbox.display(), delay);

        Ok(Self {
            _watcher: watcher,
            ready_rx,
        })
    }

    /// Start watching, then list the images already waiting.
    ///
    /// Files created while the backlog is being handled are reported by
    /// [`InboxWatcher::next`]; a file can show up in both places.
    pub fn start_with_backlog(inbox: &Path, delay: Duration) -> Result<(Self, Vec<PathBuf>)> {
        let watcher = Self::start(inbox, delay)?;
        let backlog = scan_inbox(inbox)?;
        Ok((watcher, backlog))
    }

    /// Next settled image path; `None` once the watcher has shut down
    pub async fn next(&mut self) -> Option<PathBuf> {
        self.ready_rx.recv().await
    }
}

async fn debounce_loop(
    mut raw_rx: mpsc::UnboundedReceiver<PathBuf>,
    ready_tx: mpsc::Sender<PathBuf>,
    delay: Duration,
) {
    let mut debouncer = Debouncer::new(delay);
    let mut timer = tokio::time::interval((delay / 2).max(Duration::from_millis(10)));

    loop {
        tokio::select! {
            raw = raw_rx.recv() => match raw {
                Some(path) => debouncer.push(path, Instant::now()),
                None => break,
            },
            _ = timer.tick() => {
                for path in debouncer.drain_ready(Instant::now()) {
                    if ready_tx.send(path).await.is_err() {
                        return;
                    }
                }
            }
        }
    }

    for path in debouncer.drain_all() {
        if ready_tx.send(path).await.is_err() {
            return;
        }
    }
}
