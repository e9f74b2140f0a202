//! File system watcher for detecting changes.

use lexfs_core::FileEvent;
use notify_debouncer_full::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer, RecommendedCache};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;
use tokio::sync::mpsc as tokio_mpsc;
use tracing::{debug, error, warn};

/// Debounced watcher over the registered directory roots.
///
/// Raw notifications are translated into [`FileEvent`]s and forwarded into
/// the supplied channel in delivery order. Dropping the watcher tears down
/// the backend and closes the channel.
pub struct FileWatcher {
    debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
}

impl FileWatcher {
    /// Create a watcher forwarding events into `event_tx`.
    pub fn new(
        event_tx: tokio_mpsc::Sender<FileEvent>,
        debounce: Duration,
    ) -> Result<Self, notify_debouncer_full::notify::Error> {
        let (tx, rx) = mpsc::channel();

        // Bridge thread: the only place that blocks on the debouncer output.
        std::thread::spawn(move || {
            while let Ok(result) = rx.recv() {
                if !forward_debounced(result, &event_tx) {
                    break;
                }
            }
        });

        let debouncer = new_debouncer(debounce, None, move |result| {
            let _ = tx.send(result);
        })?;

        Ok(Self { debouncer })
    }

    /// Register a directory root. Only entries directly under the root are
    /// reported.
    pub fn watch(&mut self, path: &Path) -> Result<(), notify_debouncer_full::notify::Error> {
        debug!("watching {:?}", path);
        self.debouncer.watch(path, RecursiveMode::NonRecursive)
    }

    /// Deregister a directory root.
    pub fn unwatch(&mut self, path: &Path) -> Result<(), notify_debouncer_full::notify::Error> {
        debug!("unwatching {:?}", path);
        self.debouncer.unwatch(path)
    }
}

/// Forward one debounce batch. Returns `false` once the channel is closed.
fn forward_debounced(
    result: DebounceEventResult,
    event_tx: &tokio_mpsc::Sender<FileEvent>,
) -> bool {
    match result {
        Ok(events) => {
            for event in events {
                for translated in translate_event(&event) {
                    // Blocking send keeps delivery order from a std thread.
                    if event_tx.blocking_send(translated).is_err() {
                        warn!("event channel closed");
                        return false;
                    }
                }
            }
        }
        Err(errors) => {
            for err in errors {
                error!("watch error: {err}");
            }
        }
    }
    true
}

/// Map a raw notification onto the semantic event set.
///
/// Renames have no dedicated variant; a complete rename pair decomposes into
/// a deletion of the old path and a creation of the new one.
fn translate_event(event: &notify_debouncer_full::DebouncedEvent) -> Vec<FileEvent> {
    use notify_debouncer_full::notify::event::{ModifyKind, RenameMode};
    use notify_debouncer_full::notify::EventKind;

    let Some(path) = event.paths.first() else {
        return Vec::new();
    };

    match &event.kind {
        EventKind::Create(_) => vec![FileEvent::Created(path.clone())],
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if event.paths.len() >= 2 => vec![
            FileEvent::Deleted(event.paths[0].clone()),
            FileEvent::Created(event.paths[1].clone()),
        ],
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            vec![FileEvent::Deleted(path.clone())]
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            vec![FileEvent::Created(path.clone())]
        }
        EventKind::Modify(_) => vec![FileEvent::Modified(path.clone())],
        EventKind::Remove(_) => vec![FileEvent::Deleted(path.clone())],
        _ => Vec::new(),
    }
}
