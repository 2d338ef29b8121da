//! Durable store port for message write-through persistence.
//!
//! The repository treats the durable store as the single source of truth
//! across process restarts; in-memory state is always rebuildable from it.
//! The contract is deliberately narrow: one write, one full read.

use crate::message::{domain::Message, error::RepositoryResult};
use async_trait::async_trait;

/// Port for durable message persistence.
///
/// Implementations provide the actual storage mechanism (`PostgreSQL`,
/// in-memory for testing) while the repository remains storage-agnostic.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - A successful `write_through` survives process restart
/// - `load_all` returns messages in their original insertion order, since
///   that order is the authoritative board history
/// - Concurrent writes are handled safely
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Durably persists a single message.
    ///
    /// The repository calls this before committing the message to memory;
    /// a failure here means the message is not considered stored at all.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`](crate::message::error::RepositoryError)
    /// if the write fails or a message with the same ID was already
    /// persisted.
    async fn write_through(&self, message: &Message) -> RepositoryResult<()>;

    /// Loads the complete historical message set, in insertion order.
    ///
    /// Called once at process start to seed the repository. A failure here
    /// is fatal to process initialisation.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`](crate::message::error::RepositoryError)
    /// if the backing store is unreachable or a row cannot be read.
    async fn load_all(&self) -> RepositoryResult<Vec<Message>>;
}
