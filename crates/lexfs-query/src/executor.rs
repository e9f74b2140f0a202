//! Point and ranked multi-term query execution.

use lexfs_core::{SearchResult, Tokenizer};
use lexfs_store::IndexStore;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Executes term queries against the index store.
///
/// Terms are normalized through the engine's tokenizer before lookup, so a
/// query matches exactly the tokens the indexer produced.
#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<IndexStore>,
    tokenizer: Arc<dyn Tokenizer>,
}

impl QueryExecutor {
    /// Create an executor reading from `store`.
    pub fn new(store: Arc<IndexStore>, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self { store, tokenizer }
    }

    /// Normalize a query term into index form.
    #[must_use]
    pub fn normalize(&self, term: &str) -> String {
        self.tokenizer.normalize(term)
    }

    /// Files whose token set contains the normalized `term`.
    ///
    /// Result order is unspecified.
    pub async fn search(&self, term: &str) -> Vec<SearchResult> {
        let term = self.normalize(term);
        let postings = self.store.postings(&term).await;
        debug!("search {:?}: {} hits", term, postings.len());
        postings
            .into_iter()
            .map(|file| SearchResult {
                file,
                matches: vec![term.clone()],
            })
            .collect()
    }

    /// Files matching any of `terms`, ranked by distinct terms matched.
    ///
    /// Terms are normalized and deduplicated; the accumulation runs under a
    /// single store snapshot. The result is sorted non-increasingly by match
    /// count; ties keep an arbitrary stable order.
    pub async fn search_all(&self, terms: &[String]) -> Vec<SearchResult> {
        if terms.is_empty() {
            return Vec::new();
        }

        let normalized: HashSet<String> = terms.iter().map(|t| self.normalize(t)).collect();
        let normalized: Vec<String> = normalized.into_iter().collect();

        let hits = self.store.lookup_terms(&normalized).await;
        let mut results: Vec<SearchResult> = hits
            .into_iter()
            .map(|(file, matched)| SearchResult {
                file,
                matches: matched.into_iter().collect(),
            })
            .collect();
        results.sort_by(|a, b| b.matches.len().cmp(&a.matches.len()));

        debug!(
            "search_all over {} terms: {} hits",
            normalized.len(),
            results.len()
        );
        results
    }

    /// Whether the current record for `path` contains the normalized `term`.
    pub async fn contains(&self, path: &Path, term: &str) -> bool {
        self.store.contains_token(path, term).await
    }

    /// Whether the current record for `path` contains any of `terms`.
    ///
    /// `false` when the path is not indexed.
    pub async fn intersects(&self, path: &Path, terms: &[String]) -> bool {
        match self.store.lookup(path).await {
            Some(record) => terms.iter().any(|t| record.tokens.contains(t)),
            None => false,
        }
    }
}
