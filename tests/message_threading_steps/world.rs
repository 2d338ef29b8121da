//! Shared world state for reply-thread linking BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use palaver::message::{
    adapters::memory::InMemoryDurableStore,
    domain::{ConversationId, MessageId},
    repository::MessageRepository,
};
use rstest::fixture;

/// Scenario world for reply-thread behaviour tests.
pub struct ThreadWorld {
    pub store: InMemoryDurableStore,
    pub repo: MessageRepository,
    pub clock: DefaultClock,
    pub conversation_id: ConversationId,
    pub parent_id: Option<MessageId>,
    pub reply_id: Option<MessageId>,
}

impl ThreadWorld {
    /// Creates a world with an empty repository over a fresh durable store.
    #[must_use]
    pub fn new() -> Self {
        let store = InMemoryDurableStore::new();
        let repo = MessageRepository::new(Arc::new(store.clone()));
        Self {
            store,
            repo,
            clock: DefaultClock,
            conversation_id: ConversationId::new(),
            parent_id: None,
            reply_id: None,
        }
    }
}

impl Default for ThreadWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ThreadWorld {
    ThreadWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
