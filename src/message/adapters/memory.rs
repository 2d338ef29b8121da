//! In-memory implementation of the [`DurableStore`] port.
//!
//! Provides a simple, thread-safe backing store for unit testing and local
//! runs without database dependencies. "Durable" here extends only to the
//! adapter's own lifetime; nothing survives process teardown.

use std::fmt;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::message::{
    domain::{Message, MessageId},
    error::{RepositoryError, RepositoryResult},
    ports::durable_store::DurableStore,
};

/// Error indicating a duplicate message ID was detected.
///
/// Used by the in-memory adapter to report uniqueness violations in a
/// backend-agnostic way via [`RepositoryError::persistence`].
#[derive(Debug)]
struct DuplicateIdError {
    id: MessageId,
}

impl fmt::Display for DuplicateIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "message with id {} already persisted", self.id)
    }
}

impl std::error::Error for DuplicateIdError {}

/// In-memory implementation of [`DurableStore`].
///
/// Thread-safe via internal [`RwLock`]. Preserves write order, so
/// [`load_all`](DurableStore::load_all) replays the original insertion
/// sequence.
///
/// # Example
///
/// ```
/// use palaver::message::adapters::memory::InMemoryDurableStore;
///
/// let store = InMemoryDurableStore::new();
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryDurableStore {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl InMemoryDurableStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the given history.
    ///
    /// Useful for exercising the repository's startup load path in tests.
    #[must_use]
    pub fn seeded(messages: Vec<Message>) -> Self {
        Self {
            messages: Arc::new(RwLock::new(messages)),
        }
    }

    /// Returns the number of persisted messages.
    ///
    /// Returns `0` if the internal lock is poisoned, matching the fallback
    /// behaviour of an empty store. For error-propagating access, use the
    /// port methods instead.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` if no messages are persisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DurableStore for InMemoryDurableStore {
    async fn write_through(&self, message: &Message) -> RepositoryResult<()> {
        let mut guard = self
            .messages
            .write()
            .map_err(|e| RepositoryError::connection(format!("lock poisoned: {e}")))?;

        if guard.iter().any(|stored| stored.id() == message.id()) {
            return Err(RepositoryError::persistence(DuplicateIdError {
                id: message.id(),
            }));
        }

        guard.push(message.clone());
        Ok(())
    }

    async fn load_all(&self) -> RepositoryResult<Vec<Message>> {
        let guard = self
            .messages
            .read()
            .map_err(|e| RepositoryError::connection(format!("lock poisoned: {e}")))?;

        Ok(guard.clone())
    }
}
