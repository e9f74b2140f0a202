//! Tokenizer implementations for lexfs.
//!
//! Provides [`SimpleTokenizer`], the default [`lexfs_core::Tokenizer`] used
//! when no custom tokenizer is configured.

pub mod simple;

pub use simple::SimpleTokenizer;
