//! Query execution and live subscriptions for lexfs.
//!
//! [`QueryExecutor`] serves point and ranked multi-term lookups against the
//! index store. The subscription types ([`ChangeStream`], [`WordStream`],
//! [`WordsStream`]) layer filtering and re-query on top of the engine's
//! broadcast event bus.

pub mod executor;
pub mod subscribe;

pub use executor::QueryExecutor;
pub use subscribe::{ChangeStream, WordStream, WordsStream};
