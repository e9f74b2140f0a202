//! In-memory inverted index store for lexfs.
//!
//! The [`IndexStore`] owns two coupled maps: a forward map from file path to
//! [`lexfs_core::IndexedFile`] record, and an inverted map from token to the
//! set of paths containing it. Both live behind a single multi-reader /
//! single-writer lock, so a reader always observes a record together with
//! its complete postings.

pub mod memory;

pub use memory::IndexStore;
