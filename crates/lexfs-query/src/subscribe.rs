//! Live subscriptions over the engine event bus.
//!
//! Each stream owns an independent broadcast cursor with a bounded buffer;
//! a slow consumer loses the oldest events rather than stalling the
//! publisher. Dropping a stream cancels the subscription and discards
//! anything still buffered. Streams end (`next` returns `None`) once the
//! engine closes the bus.

use crate::QueryExecutor;
use lexfs_core::{FileEvent, SearchResult};
use std::collections::{HashSet, VecDeque};
use tokio::sync::broadcast;
use tracing::debug;

/// Receive the next event, skipping over lagged gaps.
async fn next_event(rx: &mut broadcast::Receiver<FileEvent>) -> Option<FileEvent> {
    loop {
        match rx.recv().await {
            Ok(event) => return Some(event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                debug!("subscriber lagged, {skipped} events dropped");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

// ============================================================================
// Change Stream
// ============================================================================

/// Raw feed of semantic file events.
///
/// Only events published after the subscription was created are delivered;
/// there is no replay.
pub struct ChangeStream {
    rx: broadcast::Receiver<FileEvent>,
}

impl ChangeStream {
    /// Attach to the bus via an already-subscribed receiver.
    #[must_use]
    pub fn new(rx: broadcast::Receiver<FileEvent>) -> Self {
        Self { rx }
    }

    /// The next event, or `None` once the engine has closed the bus.
    pub async fn next(&mut self) -> Option<FileEvent> {
        next_event(&mut self.rx).await
    }
}

// ============================================================================
// Word Stream
// ============================================================================

/// Results for a single term: the current matches first, then live matches.
///
/// After the initial snapshot drains, every `Created` or `Modified` event
/// whose file currently contains the term yields one result; deletions yield
/// nothing.
pub struct WordStream {
    executor: QueryExecutor,
    term: String,
    backlog: VecDeque<SearchResult>,
    rx: broadcast::Receiver<FileEvent>,
}

impl WordStream {
    /// Subscribe and snapshot the current matches for `term`.
    ///
    /// The receiver must be subscribed before calling this, so a change
    /// landing while the snapshot is taken shows up as a (possibly
    /// duplicate) live emission rather than being lost.
    pub async fn attach(
        executor: QueryExecutor,
        rx: broadcast::Receiver<FileEvent>,
        term: &str,
    ) -> Self {
        let term = executor.normalize(term);
        let backlog: VecDeque<SearchResult> = executor.search(&term).await.into();
        Self {
            executor,
            term,
            backlog,
            rx,
        }
    }

    /// The next matching result, or `None` once the bus closes.
    pub async fn next(&mut self) -> Option<SearchResult> {
        if let Some(result) = self.backlog.pop_front() {
            return Some(result);
        }
        loop {
            match next_event(&mut self.rx).await? {
                FileEvent::Created(path) | FileEvent::Modified(path) => {
                    if self.executor.contains(&path, &self.term).await {
                        return Some(SearchResult {
                            file: path,
                            matches: vec![self.term.clone()],
                        });
                    }
                }
                FileEvent::Deleted(_) => {}
            }
        }
    }
}

// ============================================================================
// Words Stream
// ============================================================================

/// Full ranked result lists for a term set, re-queried on relevant changes.
///
/// The current list is emitted immediately. Afterwards every deletion, and
/// every creation or modification whose file intersects the term set,
/// triggers a re-query against the post-event index and emits the complete
/// updated list.
pub struct WordsStream {
    executor: QueryExecutor,
    terms: Vec<String>,
    initial: Option<Vec<SearchResult>>,
    rx: broadcast::Receiver<FileEvent>,
}

impl WordsStream {
    /// Subscribe and snapshot the current result list for `terms`.
    pub async fn attach(
        executor: QueryExecutor,
        rx: broadcast::Receiver<FileEvent>,
        terms: &[String],
    ) -> Self {
        let normalized: HashSet<String> = terms.iter().map(|t| executor.normalize(t)).collect();
        let terms: Vec<String> = normalized.into_iter().collect();
        let initial = executor.search_all(&terms).await;
        Self {
            executor,
            terms,
            initial: Some(initial),
            rx,
        }
    }

    /// The next full result list, or `None` once the bus closes.
    pub async fn next(&mut self) -> Option<Vec<SearchResult>> {
        if let Some(initial) = self.initial.take() {
            return Some(initial);
        }
        loop {
            let event = next_event(&mut self.rx).await?;
            let relevant = match &event {
                FileEvent::Deleted(_) => true,
                FileEvent::Created(path) | FileEvent::Modified(path) => {
                    self.executor.intersects(path, &self.terms).await
                }
            };
            if relevant {
                return Some(self.executor.search_all(&self.terms).await);
            }
        }
    }
}
