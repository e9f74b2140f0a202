//! Per-file indexing pipeline.

use chrono::{DateTime, Utc};
use lexfs_core::{FileFilter, IndexedFile, Tokenizer};
use lexfs_store::IndexStore;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-file pipeline: read, tokenize, and commit to the store.
///
/// Every fault is isolated to the file it occurred on; a file that cannot be
/// read this round is simply not (re-)indexed.
pub struct FileIndexer {
    store: Arc<IndexStore>,
    tokenizer: Arc<dyn Tokenizer>,
    filter: FileFilter,
    max_file_size: u64,
}

impl FileIndexer {
    /// Create a pipeline committing into `store`.
    pub fn new(
        store: Arc<IndexStore>,
        tokenizer: Arc<dyn Tokenizer>,
        filter: FileFilter,
        max_file_size: u64,
    ) -> Self {
        Self {
            store,
            tokenizer,
            filter,
            max_file_size,
        }
    }

    /// Build an index record for `path`.
    ///
    /// Returns `None` when the path is filtered out, does not resolve to a
    /// regular file, exceeds the size cap, or any I/O step fails.
    pub async fn index(&self, path: &Path) -> Option<IndexedFile> {
        if !(self.filter)(path) {
            return None;
        }

        let metadata = match tokio::fs::metadata(path).await {
            Ok(m) => m,
            Err(e) => {
                debug!("skipping {:?}: {}", path, e);
                return None;
            }
        };
        if !metadata.is_file() {
            return None;
        }
        if metadata.len() > self.max_file_size {
            warn!(
                "skipping {:?}: {} bytes exceeds the {} byte cap",
                path,
                metadata.len(),
                self.max_file_size
            );
            return None;
        }

        let bytes = match tokio::fs::read(path).await {
            Ok(b) => b,
            Err(e) => {
                debug!("skipping {:?}: {}", path, e);
                return None;
            }
        };

        let content_hash = blake3::hash(&bytes).to_hex().to_string();
        let content = String::from_utf8_lossy(&bytes);
        let tokens = self.tokenizer.tokenize(&content);
        let modified_at = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        Some(IndexedFile {
            path: path.to_path_buf(),
            modified_at,
            content_hash,
            tokens,
        })
    }

    /// Index `path` and commit the record, replacing any prior postings.
    ///
    /// A record whose content hash equals the stored one is skipped. Returns
    /// whether the store changed.
    pub async fn apply(&self, path: &Path) -> bool {
        let Some(record) = self.index(path).await else {
            return false;
        };

        if let Some(existing) = self.store.lookup(path).await {
            if existing.content_hash == record.content_hash {
                debug!("unchanged contents for {:?}, skipping", path);
                return false;
            }
        }

        self.store.upsert(record).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexfs_core::txt_filter;
    use lexfs_token::SimpleTokenizer;
    use tempfile::tempdir;

    const TEST_MAX_SIZE: u64 = 1024 * 1024;

    fn indexer(store: Arc<IndexStore>) -> FileIndexer {
        FileIndexer::new(
            store,
            Arc::new(SimpleTokenizer::new()),
            txt_filter(),
            TEST_MAX_SIZE,
        )
    }

    #[tokio::test]
    async fn test_index_reads_and_tokenizes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "hello world kotlin programming").unwrap();

        let store = Arc::new(IndexStore::new());
        let record = indexer(store).index(&path).await.unwrap();

        assert_eq!(record.path, path);
        assert_eq!(record.tokens.len(), 4);
        assert!(record.tokens.contains("kotlin"));
        assert!(!record.content_hash.is_empty());
    }

    #[tokio::test]
    async fn test_index_honours_filter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("e.json");
        std::fs::write(&path, "json data structure").unwrap();

        let store = Arc::new(IndexStore::new());
        assert!(indexer(store).index(&path).await.is_none());
    }

    #[tokio::test]
    async fn test_index_skips_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let store = Arc::new(IndexStore::new());
        assert!(indexer(store).index(&path).await.is_none());
    }

    #[tokio::test]
    async fn test_index_skips_directory() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub.txt");
        std::fs::create_dir(&sub).unwrap();

        let store = Arc::new(IndexStore::new());
        assert!(indexer(store).index(&sub).await.is_none());
    }

    #[tokio::test]
    async fn test_index_skips_oversized_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, "word ".repeat(64)).unwrap();

        let store = Arc::new(IndexStore::new());
        let small_cap = FileIndexer::new(
            store,
            Arc::new(SimpleTokenizer::new()),
            txt_filter(),
            16,
        );
        assert!(small_cap.index(&path).await.is_none());
    }

    #[tokio::test]
    async fn test_apply_commits_to_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "hello world").unwrap();

        let store = Arc::new(IndexStore::new());
        assert!(indexer(Arc::clone(&store)).apply(&path).await);

        assert!(store.postings("hello").await.contains(&path));
        assert!(store.lookup(&path).await.is_some());
    }

    #[tokio::test]
    async fn test_apply_skips_unchanged_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "stable content").unwrap();

        let store = Arc::new(IndexStore::new());
        let idx = indexer(Arc::clone(&store));

        assert!(idx.apply(&path).await);
        assert!(!idx.apply(&path).await);
        assert_eq!(store.stats().await.indexed_files, 1);
    }

    #[tokio::test]
    async fn test_apply_reindexes_changed_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "old words here").unwrap();

        let store = Arc::new(IndexStore::new());
        let idx = indexer(Arc::clone(&store));
        idx.apply(&path).await;

        std::fs::write(&path, "entirely new words").unwrap();
        assert!(idx.apply(&path).await);

        assert!(store.postings("old").await.is_empty());
        assert!(store.postings("entirely").await.contains(&path));
    }
}
