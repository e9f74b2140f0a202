//! One-shot traversal of the configured roots.

use crate::FileIndexer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Walk every root and feed each regular file through the indexer.
///
/// A root that is a regular file is indexed directly; a directory is walked
/// recursively. Roots that do not exist or cannot be read are skipped.
pub async fn scan(roots: &[PathBuf], indexer: &Arc<FileIndexer>) {
    for root in roots {
        let walk_root = root.clone();
        let files = match tokio::task::spawn_blocking(move || collect_files(&walk_root)).await {
            Ok(files) => files,
            Err(e) => {
                warn!("walk of {:?} failed: {}", root, e);
                continue;
            }
        };

        info!("scanning {:?}: {} candidate files", root, files.len());
        for file in &files {
            indexer.apply(file).await;
        }
    }
}

fn collect_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if root.is_file() {
        files.push(root.to_path_buf());
    } else if root.is_dir() {
        visit_dir(root, &mut files);
    }
    files
}

fn visit_dir(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("cannot read directory {:?}: {}", dir, e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_dir(&path, files);
        } else if path.is_file() {
            files.push(path);
        }
    }
}
