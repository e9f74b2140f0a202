//! # lexfs-core
//!
//! Core types and traits for lexfs, an embeddable in-memory text-search
//! engine that keeps an inverted index consistent with the filesystem.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`IndexedFile`] | A file's record in the index: path, timestamp, token set |
//! | [`FileEvent`] | Semantic filesystem event published on the engine bus |
//! | [`SearchResult`] | A file matching one or more query terms |
//! | [`IndexStats`] | Counters describing the current index |
//! | [`EngineState`] | Engine lifecycle state |
//!
//! ## Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Tokenizer`] | Split file contents into normalized tokens |
//!
//! The [`FileFilter`] alias is the pluggable eligibility predicate applied
//! to every path before it can enter the index, whether it arrives from the
//! initial scan or from a change notification.
//!
//! ## Related Crates
//!
//! - `lexfs-token`: the default tokenizer implementation
//! - `lexfs-store`: the inverted index store
//! - `lexfs-index`: scanning, per-file indexing, and filesystem watching
//! - `lexfs-query`: query execution and live subscriptions
//! - `lexfs`: the engine facade

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::{txt_filter, FileFilter, Tokenizer};
pub use types::{EngineState, FileEvent, IndexStats, IndexedFile, SearchResult};
