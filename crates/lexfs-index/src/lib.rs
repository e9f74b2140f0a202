//! Filesystem side of lexfs: scanning, per-file indexing, and watching.
//!
//! - [`FileIndexer`]: the read → tokenize → diff → apply pipeline for a
//!   single file
//! - [`scanner`]: one-shot traversal of the configured roots at startup
//! - [`FileWatcher`]: debounced filesystem notifications translated into
//!   semantic [`lexfs_core::FileEvent`]s

pub mod indexer;
pub mod scanner;
pub mod watcher;

pub use indexer::FileIndexer;
pub use watcher::FileWatcher;
