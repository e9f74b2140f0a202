//! # lexfs
//!
//! Embeddable in-memory text-search engine that maintains an inverted index
//! over a set of filesystem roots and keeps it consistent with the
//! underlying storage by reacting to change notifications.
//!
//! The engine offers synchronous point queries ("which files contain this
//! word?"), ranked multi-term queries, and long-lived subscriptions that
//! re-emit results whenever relevant files change.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lexfs::Engine;
//!
//! let engine = Engine::builder().root("/tmp/d").build();
//! engine.start().await?;
//!
//! for result in engine.search("hello").await {
//!     println!("{:?} matched {:?}", result.file, result.matches);
//! }
//!
//! let mut live = engine.watch_for_word("hello").await;
//! while let Some(result) = live.next().await {
//!     println!("now in {:?}", result.file);
//! }
//!
//! engine.close().await?;
//! ```
//!
//! ## Crate layout
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `lexfs-core` | Shared types, the `Tokenizer` trait, errors |
//! | `lexfs-token` | Default tokenizer |
//! | `lexfs-store` | The inverted index store |
//! | `lexfs-index` | Scanning, per-file indexing, filesystem watching |
//! | `lexfs-query` | Query execution and subscription streams |
//! | `lexfs` | This facade: configuration and lifecycle |

mod engine;

pub use engine::{Engine, EngineBuilder};
pub use lexfs_core::{
    EngineState, Error, FileEvent, FileFilter, IndexStats, IndexedFile, Result, SearchResult,
    Tokenizer,
};
pub use lexfs_query::{ChangeStream, WordStream, WordsStream};
pub use lexfs_token::SimpleTokenizer;
