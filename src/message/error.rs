//! Error types for message storage and retrieval.
//!
//! Uses `thiserror` for ergonomic error handling with typed variants that
//! can be inspected by callers.
//!
//! Lookup misses are deliberately absent from this taxonomy: a lookup by an
//! unknown identifier is an ordinary outcome represented as `None` or an
//! empty vector, never as an error. Likewise an orphaned reply link (a
//! parent identifier with no matching stored message) is non-fatal; the
//! repository stores the message, drops the link, and reports it through a
//! `tracing` warning only.

use super::domain::MessageId;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for repository and durable store operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors returned by the message repository and its durable store port.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// A message with this identifier is already stored.
    #[error("duplicate message: {0}")]
    DuplicateMessage(MessageId),

    /// The durable write-through or bulk load failed. The insertion or load
    /// is aborted and in-memory state is left unchanged.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),

    /// The durable write-through did not complete within the configured
    /// bound. The message is not considered committed.
    #[error("durable write timed out after {limit:?}")]
    PersistenceTimeout {
        /// The timeout that was exceeded.
        limit: Duration,
    },

    /// A connection-level failure: a poisoned repository lock or an
    /// unavailable database pool.
    #[error("connection error: {0}")]
    Connection(String),
}

impl RepositoryError {
    /// Wraps an underlying cause as a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}
