//! Core types for lexfs.
//!
//! - [`IndexedFile`]: a file's record in the index
//! - [`FileEvent`]: semantic filesystem event for subscribers
//! - [`SearchResult`]: a file matching one or more query terms
//! - [`IndexStats`]: counters describing the current index
//! - [`EngineState`]: engine lifecycle state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ============================================================================
// Indexed Files
// ============================================================================

/// A file as recorded in the index.
///
/// Records are keyed by absolute path; replacing a record removes every
/// stale posting its prior token set produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedFile {
    /// Absolute path, the unique key
    pub path: PathBuf,
    /// Last modification time of the file contents
    pub modified_at: DateTime<Utc>,
    /// Content hash for change detection (blake3)
    pub content_hash: String,
    /// Distinct normalized tokens found in the contents
    pub tokens: HashSet<String>,
}

// ============================================================================
// File Events
// ============================================================================

/// Semantic filesystem event published on the engine bus.
///
/// Events are emitted after the corresponding index mutation has been
/// applied, so a subscriber re-querying on receipt observes the post-event
/// index state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum FileEvent {
    Created(PathBuf),
    Modified(PathBuf),
    Deleted(PathBuf),
}

impl FileEvent {
    /// The path this event refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(p) | Self::Modified(p) | Self::Deleted(p) => p,
        }
    }
}

// ============================================================================
// Search Results
// ============================================================================

/// A file matching one or more query terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Matching file path
    pub file: PathBuf,
    /// The distinct normalized query terms the file matched
    pub matches: Vec<String>,
}

// ============================================================================
// Index Statistics
// ============================================================================

/// Counters describing the current index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Files currently indexed
    pub indexed_files: u64,
    /// Distinct tokens with at least one posting
    pub distinct_tokens: u64,
    /// Time of the last committed index mutation
    pub last_update: Option<DateTime<Utc>>,
}

// ============================================================================
// Engine State
// ============================================================================

/// Engine lifecycle state.
///
/// `start` is valid only from `New`. `stop` keeps the index intact; `close`
/// clears it and ends every subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    New,
    Running,
    Stopped,
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== IndexedFile Tests ====================

    #[test]
    fn test_indexed_file_serialization() {
        let record = IndexedFile {
            path: PathBuf::from("/tmp/d/a.txt"),
            modified_at: Utc::now(),
            content_hash: "abc123".to_string(),
            tokens: ["hello", "world"].iter().map(|t| (*t).to_string()).collect(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: IndexedFile = serde_json::from_str(&json).unwrap();

        assert_eq!(record.path, deserialized.path);
        assert_eq!(record.content_hash, deserialized.content_hash);
        assert_eq!(record.tokens, deserialized.tokens);
    }

    // ==================== FileEvent Tests ====================

    #[test]
    fn test_file_event_created() {
        let event = FileEvent::Created(PathBuf::from("/tmp/d/new.txt"));
        assert_eq!(event.path(), Path::new("/tmp/d/new.txt"));
        assert!(matches!(event, FileEvent::Created(_)));
    }

    #[test]
    fn test_file_event_modified() {
        let event = FileEvent::Modified(PathBuf::from("/tmp/d/changed.txt"));
        assert_eq!(event.path(), Path::new("/tmp/d/changed.txt"));
    }

    #[test]
    fn test_file_event_deleted() {
        let event = FileEvent::Deleted(PathBuf::from("/tmp/d/removed.txt"));
        assert_eq!(event.path(), Path::new("/tmp/d/removed.txt"));
    }

    #[test]
    fn test_file_event_serialization() {
        let event = FileEvent::Created(PathBuf::from("/tmp/d/a.txt"));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"created\""));

        let deserialized: FileEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }

    // ==================== SearchResult Tests ====================

    #[test]
    fn test_search_result_serialization() {
        let result = SearchResult {
            file: PathBuf::from("/tmp/d/a.txt"),
            matches: vec!["hello".to_string(), "world".to_string()],
        };

        let json = serde_json::to_string(&result).unwrap();
        let deserialized: SearchResult = serde_json::from_str(&json).unwrap();

        assert_eq!(result, deserialized);
    }

    // ==================== IndexStats Tests ====================

    #[test]
    fn test_index_stats_default() {
        let stats = IndexStats::default();
        assert_eq!(stats.indexed_files, 0);
        assert_eq!(stats.distinct_tokens, 0);
        assert!(stats.last_update.is_none());
    }

    // ==================== EngineState Tests ====================

    #[test]
    fn test_engine_state_serialization() {
        assert_eq!(serde_json::to_string(&EngineState::New).unwrap(), "\"new\"");
        assert_eq!(
            serde_json::to_string(&EngineState::Running).unwrap(),
            "\"running\""
        );
        assert_eq!(
            serde_json::to_string(&EngineState::Closed).unwrap(),
            "\"closed\""
        );
    }

    #[test]
    fn test_engine_state_equality() {
        assert_eq!(EngineState::New, EngineState::New);
        assert_ne!(EngineState::Running, EngineState::Stopped);
    }
}
