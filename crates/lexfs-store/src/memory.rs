//! The inverted index and its reader/writer discipline.

use chrono::{DateTime, Utc};
use lexfs_core::{IndexStats, IndexedFile};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

/// The coupled forward and inverted maps.
///
/// Invariants across every committed update:
/// - a path appears in a token's posting set iff the token is in that path's
///   forward record;
/// - a token key exists iff its posting set is non-empty.
#[derive(Debug, Default)]
struct IndexMaps {
    forward: HashMap<PathBuf, IndexedFile>,
    inverted: HashMap<String, HashSet<PathBuf>>,
    last_update: Option<DateTime<Utc>>,
}

impl IndexMaps {
    /// Remove `path` from the posting set of every token in `tokens`,
    /// pruning posting sets that become empty.
    fn unlink(&mut self, path: &Path, tokens: &HashSet<String>) {
        for token in tokens {
            if let Some(postings) = self.inverted.get_mut(token) {
                postings.remove(path);
                if postings.is_empty() {
                    self.inverted.remove(token);
                }
            }
        }
    }
}

/// Multi-reader / single-writer inverted index over file contents.
///
/// Writers serialize; readers run in parallel with each other. Every
/// `upsert`/`remove` holds the write guard for the entire prior-removal plus
/// insertion sequence, so no reader observes a half-replaced record.
#[derive(Debug, Default)]
pub struct IndexStore {
    maps: RwLock<IndexMaps>,
}

impl IndexStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `record.path`.
    ///
    /// Any postings produced by a prior record for the same path are removed
    /// before the new token set is linked in. Re-inserting an identical
    /// record is observationally a no-op.
    pub async fn upsert(&self, record: IndexedFile) {
        let mut maps = self.maps.write().await;
        if let Some(prior) = maps.forward.remove(&record.path) {
            maps.unlink(&record.path, &prior.tokens);
        }
        for token in &record.tokens {
            maps.inverted
                .entry(token.clone())
                .or_default()
                .insert(record.path.clone());
        }
        debug!("indexed {:?} ({} tokens)", record.path, record.tokens.len());
        maps.last_update = Some(Utc::now());
        maps.forward.insert(record.path.clone(), record);
    }

    /// Remove `path` from the index. Removing an absent path is a no-op.
    pub async fn remove(&self, path: &Path) {
        let mut maps = self.maps.write().await;
        if let Some(prior) = maps.forward.remove(path) {
            maps.unlink(path, &prior.tokens);
            maps.last_update = Some(Utc::now());
            debug!("removed {:?} from index", path);
        }
    }

    /// The set of paths whose token set contains `token`.
    ///
    /// Returns a snapshot copy; iteration order is unspecified.
    pub async fn postings(&self, token: &str) -> HashSet<PathBuf> {
        let maps = self.maps.read().await;
        maps.inverted.get(token).cloned().unwrap_or_default()
    }

    /// The indexed record for `path`, if present.
    pub async fn lookup(&self, path: &Path) -> Option<IndexedFile> {
        self.maps.read().await.forward.get(path).cloned()
    }

    /// Whether the current record for `path` contains `token`.
    pub async fn contains_token(&self, path: &Path, token: &str) -> bool {
        self.maps
            .read()
            .await
            .forward
            .get(path)
            .is_some_and(|record| record.tokens.contains(token))
    }

    /// Accumulate, for every indexed path, which of `terms` it matches.
    ///
    /// The whole accumulation runs under one read-guard acquisition, so a
    /// single call observes a single committed snapshot of the index.
    pub async fn lookup_terms(&self, terms: &[String]) -> HashMap<PathBuf, HashSet<String>> {
        let maps = self.maps.read().await;
        let mut hits: HashMap<PathBuf, HashSet<String>> = HashMap::new();
        for term in terms {
            if let Some(postings) = maps.inverted.get(term) {
                for path in postings {
                    hits.entry(path.clone()).or_default().insert(term.clone());
                }
            }
        }
        hits
    }

    /// Drop every record and posting.
    pub async fn clear(&self) {
        let mut maps = self.maps.write().await;
        maps.forward.clear();
        maps.inverted.clear();
        maps.last_update = Some(Utc::now());
        debug!("index cleared");
    }

    /// Counters describing the current index.
    pub async fn stats(&self) -> IndexStats {
        let maps = self.maps.read().await;
        IndexStats {
            indexed_files: maps.forward.len() as u64,
            distinct_tokens: maps.inverted.len() as u64,
            last_update: maps.last_update,
        }
    }
}
