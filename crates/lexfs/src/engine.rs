//! Engine facade: configuration, lifecycle, queries, subscriptions.

use lexfs_core::{
    txt_filter, EngineState, Error, FileEvent, FileFilter, IndexStats, Result, SearchResult,
    Tokenizer,
};
use lexfs_index::{scanner, FileIndexer, FileWatcher};
use lexfs_query::{ChangeStream, QueryExecutor, WordStream, WordsStream};
use lexfs_store::IndexStore;
use lexfs_token::SimpleTokenizer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const DEFAULT_BUS_CAPACITY: usize = 256;
const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;
const WATCH_CHANNEL_CAPACITY: usize = 1024;

/// Builder for [`Engine`].
///
/// An engine built with no roots is valid; it indexes nothing and emits
/// nothing.
pub struct EngineBuilder {
    roots: Vec<PathBuf>,
    tokenizer: Option<Arc<dyn Tokenizer>>,
    filter: Option<FileFilter>,
    debounce: Duration,
    max_file_size: u64,
    bus_capacity: usize,
}

impl EngineBuilder {
    /// Start a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            tokenizer: None,
            filter: None,
            debounce: DEFAULT_DEBOUNCE,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            bus_capacity: DEFAULT_BUS_CAPACITY,
        }
    }

    /// Add a root path to scan and watch.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.roots.push(path.into());
        self
    }

    /// Add several root paths.
    #[must_use]
    pub fn roots<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Replace the default [`SimpleTokenizer`].
    #[must_use]
    pub fn tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Replace the default `.txt` file filter.
    #[must_use]
    pub fn file_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Debounce window for filesystem notifications.
    #[must_use]
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Maximum size of a file eligible for indexing, in bytes.
    #[must_use]
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Per-subscriber event buffer capacity.
    #[must_use]
    pub fn bus_capacity(mut self, capacity: usize) -> Self {
        self.bus_capacity = capacity.max(1);
        self
    }

    /// Build the engine. The engine does nothing until [`Engine::start`].
    #[must_use]
    pub fn build(self) -> Engine {
        let tokenizer = self
            .tokenizer
            .unwrap_or_else(|| Arc::new(SimpleTokenizer::new()));
        let filter = self.filter.unwrap_or_else(txt_filter);
        let store = Arc::new(IndexStore::new());
        let indexer = Arc::new(FileIndexer::new(
            Arc::clone(&store),
            Arc::clone(&tokenizer),
            Arc::clone(&filter),
            self.max_file_size,
        ));
        let executor = QueryExecutor::new(Arc::clone(&store), tokenizer);
        let (bus_tx, _) = broadcast::channel(self.bus_capacity);

        Engine {
            roots: self.roots,
            debounce: self.debounce,
            store,
            indexer,
            executor,
            filter,
            bus: RwLock::new(Some(bus_tx)),
            state: RwLock::new(EngineState::New),
            watcher: Mutex::new(None),
            monitor: Mutex::new(None),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The search engine: index, watcher, bus, and query surface.
///
/// Lifecycle: `New → Running → Stopped` (`close` additionally clears the
/// index and ends every subscription). All methods take `&self`; the engine
/// is usually wrapped in an `Arc` and shared.
pub struct Engine {
    roots: Vec<PathBuf>,
    debounce: Duration,
    store: Arc<IndexStore>,
    indexer: Arc<FileIndexer>,
    executor: QueryExecutor,
    filter: FileFilter,
    bus: RwLock<Option<broadcast::Sender<FileEvent>>>,
    state: RwLock<EngineState>,
    watcher: Mutex<Option<FileWatcher>>,
    monitor: Mutex<Option<JoinHandle<()>>>,
}

impl Engine {
    /// Start building an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Scan the roots, then open the watcher and launch the monitoring task.
    ///
    /// Valid only from the `New` state. Per-root watch registration failures
    /// are logged and skipped; the engine continues with whatever
    /// registrations succeeded.
    pub async fn start(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            if *state != EngineState::New {
                return Err(Error::State(format!(
                    "start requires a new engine, found {:?}",
                    *state
                )));
            }
            *state = EngineState::Running;
        }

        let roots = self.canonical_roots().await;
        info!("starting engine over {} roots", roots.len());

        // Initial scan completes before any notification is observed.
        scanner::scan(&roots, &self.indexer).await;

        let (raw_tx, mut raw_rx) = mpsc::channel(WATCH_CHANNEL_CAPACITY);
        let mut watcher = match FileWatcher::new(raw_tx, self.debounce) {
            Ok(w) => w,
            Err(e) => {
                *self.state.write().await = EngineState::Stopped;
                return Err(Error::Watch(e.to_string()));
            }
        };
        for root in roots.iter().filter(|root| root.is_dir()) {
            if let Err(e) = watcher.watch(root) {
                warn!("cannot watch {:?}: {}", root, e);
            }
        }
        *self.watcher.lock().await = Some(watcher);

        let Some(bus_tx) = self.bus.read().await.clone() else {
            return Err(Error::State("engine is closed".to_string()));
        };
        let indexer = Arc::clone(&self.indexer);
        let store = Arc::clone(&self.store);
        let filter = Arc::clone(&self.filter);

        let handle = tokio::spawn(async move {
            while let Some(event) = raw_rx.recv().await {
                if !(filter)(event.path()) {
                    continue;
                }
                match &event {
                    FileEvent::Created(path) | FileEvent::Modified(path) => {
                        // A file that vanished in a race is simply not
                        // re-indexed; the event is still published.
                        indexer.apply(path).await;
                    }
                    FileEvent::Deleted(path) => {
                        store.remove(path).await;
                    }
                }
                // Publish after the index side-effect so subscribers
                // re-querying on receipt observe the post-event state.
                let _ = bus_tx.send(event);
            }
            debug!("monitor task exiting");
        });
        *self.monitor.lock().await = Some(handle);

        Ok(())
    }

    /// Stop watching and cancel the monitoring task.
    ///
    /// Idempotent; the index stays intact and queries keep working.
    pub async fn stop(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            if *state != EngineState::Running {
                return Ok(());
            }
            *state = EngineState::Stopped;
        }

        // Dropping the watcher tears down the notification backend and
        // closes the event channel, which ends the monitor loop.
        self.watcher.lock().await.take();
        if let Some(handle) = self.monitor.lock().await.take() {
            if let Err(e) = handle.await {
                warn!("monitor task failed: {e}");
            }
        }
        info!("engine stopped");
        Ok(())
    }

    /// Stop, clear the index, and end every subscription.
    ///
    /// Searches after `close` return empty results.
    pub async fn close(&self) -> Result<()> {
        self.stop().await?;
        {
            let mut state = self.state.write().await;
            if *state == EngineState::Closed {
                return Ok(());
            }
            *state = EngineState::Closed;
        }
        // Dropping the sender makes every subscriber observe end-of-stream.
        self.bus.write().await.take();
        self.store.clear().await;
        info!("engine closed");
        Ok(())
    }

    /// Files whose contents contain the normalized `term`.
    pub async fn search(&self, term: &str) -> Vec<SearchResult> {
        self.executor.search(term).await
    }

    /// Files matching any of `terms`, ranked by distinct terms matched.
    pub async fn search_all<S: AsRef<str>>(&self, terms: &[S]) -> Vec<SearchResult> {
        let terms: Vec<String> = terms.iter().map(|t| t.as_ref().to_owned()).collect();
        self.executor.search_all(&terms).await
    }

    /// Subscribe to the raw event feed. No replay of past events.
    pub async fn watch_for_changes(&self) -> ChangeStream {
        ChangeStream::new(self.subscribe().await)
    }

    /// Subscribe to matches for a single term: current results first, then
    /// live matches as files change.
    pub async fn watch_for_word(&self, term: &str) -> WordStream {
        let rx = self.subscribe().await;
        WordStream::attach(self.executor.clone(), rx, term).await
    }

    /// Subscribe to the full ranked result list for a term set, re-emitted
    /// on every relevant change.
    pub async fn watch_for_words<S: AsRef<str>>(&self, terms: &[S]) -> WordsStream {
        let rx = self.subscribe().await;
        let terms: Vec<String> = terms.iter().map(|t| t.as_ref().to_owned()).collect();
        WordsStream::attach(self.executor.clone(), rx, &terms).await
    }

    /// Counters describing the current index.
    pub async fn stats(&self) -> IndexStats {
        self.store.stats().await
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> EngineState {
        *self.state.read().await
    }

    async fn subscribe(&self) -> broadcast::Receiver<FileEvent> {
        match self.bus.read().await.as_ref() {
            Some(tx) => tx.subscribe(),
            None => {
                // Closed engine: hand out a receiver that ends immediately.
                let (tx, rx) = broadcast::channel(1);
                drop(tx);
                rx
            }
        }
    }

    async fn canonical_roots(&self) -> Vec<PathBuf> {
        let mut roots = Vec::with_capacity(self.roots.len());
        for root in &self.roots {
            match tokio::fs::canonicalize(root).await {
                Ok(canonical) => roots.push(canonical),
                Err(e) => warn!("skipping root {:?}: {}", root, e),
            }
        }
        roots
    }
}
