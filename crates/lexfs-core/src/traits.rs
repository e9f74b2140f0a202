//! Component traits and pluggable hooks.
//!
//! The engine is parameterized over two seams: the [`Tokenizer`] that turns
//! file contents into index tokens, and the [`FileFilter`] that decides which
//! paths are eligible for indexing at all.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Trait for splitting file contents into normalized tokens.
///
/// Both operations are pure. Every token produced by
/// [`tokenize`](Tokenizer::tokenize) must be a fixed point of
/// [`normalize`](Tokenizer::normalize), since queries are normalized before
/// index lookup.
pub trait Tokenizer: Send + Sync {
    /// Extract the set of distinct normalized tokens from file contents.
    fn tokenize(&self, content: &str) -> HashSet<String>;

    /// Normalize a query term into index form.
    fn normalize(&self, term: &str) -> String;
}

/// Predicate deciding whether a path is eligible for indexing.
///
/// Applied to every path before it can enter the index, whether it arrives
/// from the initial scan or from a change notification.
pub type FileFilter = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// The default filter: accepts paths with a `.txt` extension.
#[must_use]
pub fn txt_filter() -> FileFilter {
    Arc::new(|path: &Path| {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
    })
}
