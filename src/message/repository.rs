//! The in-memory message repository.
//!
//! Holds the full set of messages for the board, maintains the derived
//! lookup indexes, and write-through persists every accepted insertion via
//! the [`DurableStore`] port. A single repository instance is constructed at
//! the application composition root and shared by all request handlers.
//!
//! # Indexing scheme
//!
//! The authoritative state is the insertion-ordered message sequence; every
//! chronological view and "most recent N" query derives from it. Four
//! indexes map identifiers to positions in that sequence: by message ID, by
//! reply-thread parent, by conversation, and by author. Messages are never
//! removed, so positions are stable, and every index is maintained inside
//! the same lock-guarded mutation as the sequence itself. Readers can
//! therefore never observe a message in the sequence before its index
//! entries exist.
//!
//! # Reply-thread linking
//!
//! Incremental insertion links a reply to its parent only when the parent
//! is already stored (single-pass, order-dependent); a reply whose parent is
//! unknown is stored but permanently orphaned from any child list. Bulk
//! replacement rebuilds the child index in two passes so the result is
//! independent of input ordering. These are deliberately distinct policies;
//! see [`MessageRepository::insert`] and [`MessageRepository::replace_all`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tracing::{debug, warn};

use super::{
    domain::{ConversationId, Message, MessageId, UserId},
    error::{RepositoryError, RepositoryResult},
    ports::DurableStore,
};

/// Default bound on a single durable write-through call.
const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Tuning knobs for a [`MessageRepository`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryConfig {
    write_timeout: Duration,
}

impl RepositoryConfig {
    /// Creates a configuration with the given durable-write timeout.
    #[must_use]
    pub const fn new(write_timeout: Duration) -> Self {
        Self { write_timeout }
    }

    /// Returns the bound applied to each durable write-through call.
    #[must_use]
    pub const fn write_timeout(&self) -> Duration {
        self.write_timeout
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WRITE_TIMEOUT)
    }
}

/// The sequence and indexes guarded together by the repository lock.
#[derive(Debug, Default)]
struct RepositoryState {
    /// Authoritative message history in insertion order.
    messages: Vec<Message>,
    /// Message ID to position in `messages`.
    by_id: HashMap<MessageId, usize>,
    /// Parent message ID to positions of its direct replies. Every stored
    /// message owns an entry here, even when it has no replies yet.
    children: HashMap<MessageId, Vec<usize>>,
    /// Conversation ID to positions of its messages, insertion order.
    by_conversation: HashMap<ConversationId, Vec<usize>>,
    /// Author ID to positions of their messages, insertion order.
    by_author: HashMap<UserId, Vec<usize>>,
}

impl RepositoryState {
    /// Appends a message and updates every index in one step.
    ///
    /// Single-pass linking: the reply link is resolved against parents
    /// already present, and dropped otherwise. The caller has already
    /// rejected duplicate identifiers.
    fn append(&mut self, message: Message) {
        let position = self.messages.len();
        let id = message.id();

        self.by_id.insert(id, position);
        self.children.insert(id, Vec::new());
        self.by_conversation
            .entry(message.conversation_id())
            .or_default()
            .push(position);
        self.by_author
            .entry(message.author_id())
            .or_default()
            .push(position);

        if let Some(parent_id) = message.parent_id() {
            match self.children.get_mut(&parent_id) {
                Some(siblings) => siblings.push(position),
                None => warn!(
                    message_id = %id,
                    parent_id = %parent_id,
                    "dropping reply link to unknown parent"
                ),
            }
        }

        self.messages.push(message);
    }

    /// Rebuilds the full state from a replacement message sequence.
    ///
    /// Two passes keep the child index order-independent: the first creates
    /// an empty child list for every message, the second links every reply
    /// whose parent appears anywhere in the set. A reply can thus precede
    /// its parent in the input without losing its link.
    fn rebuild(messages: Vec<Message>) -> Self {
        let mut state = Self {
            messages,
            ..Self::default()
        };

        for (position, message) in state.messages.iter().enumerate() {
            state.by_id.insert(message.id(), position);
            state.children.insert(message.id(), Vec::new());
            state
                .by_conversation
                .entry(message.conversation_id())
                .or_default()
                .push(position);
            state
                .by_author
                .entry(message.author_id())
                .or_default()
                .push(position);
        }

        for (position, message) in state.messages.iter().enumerate() {
            if let Some(parent_id) = message.parent_id() {
                match state.children.get_mut(&parent_id) {
                    Some(siblings) => siblings.push(position),
                    None => warn!(
                        message_id = %message.id(),
                        parent_id = %parent_id,
                        "orphaned reply link in loaded history"
                    ),
                }
            }
        }

        state
    }

    /// Clones the messages at the given index positions, in index order.
    fn collect(&self, positions: &[usize]) -> Vec<Message> {
        positions
            .iter()
            .filter_map(|&position| self.messages.get(position).cloned())
            .collect()
    }
}

/// In-memory message store with write-through durable persistence.
///
/// The repository is the single source of truth for message state during a
/// process's lifetime. Construct one instance at the composition root,
/// [`load`](Self::load) it from the durable store, and inject it (behind an
/// `Arc`) into the caller layer; do not reach for it through globals.
///
/// # Concurrency
///
/// Mutations are applied as a single serialised step covering the sequence
/// and all indexes; reads run concurrently with each other but never with a
/// mutation. The internal lock is never held across the durable write, so
/// a slow backing store cannot stall readers; the write itself is bounded
/// by [`RepositoryConfig::write_timeout`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use palaver::message::adapters::memory::InMemoryDurableStore;
/// use palaver::message::repository::MessageRepository;
///
/// let repo = MessageRepository::new(Arc::new(InMemoryDurableStore::new()));
/// assert!(repo.is_empty());
/// ```
pub struct MessageRepository {
    durable: Arc<dyn DurableStore>,
    config: RepositoryConfig,
    state: RwLock<RepositoryState>,
}

impl std::fmt::Debug for MessageRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageRepository")
            .field("config", &self.config)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl MessageRepository {
    /// Creates an empty repository backed by the given durable store.
    #[must_use]
    pub fn new(durable: Arc<dyn DurableStore>) -> Self {
        Self::with_config(durable, RepositoryConfig::default())
    }

    /// Creates an empty repository with explicit configuration.
    #[must_use]
    pub fn with_config(durable: Arc<dyn DurableStore>, config: RepositoryConfig) -> Self {
        Self {
            durable,
            config,
            state: RwLock::new(RepositoryState::default()),
        }
    }

    /// Inserts a new message: durable write-through first, then one atomic
    /// in-memory update of the sequence and every index.
    ///
    /// The message's own (empty) child-list entry is created so it can
    /// accept replies later. If the message declares a parent that is
    /// already stored, it is appended to that parent's child list; an
    /// unknown parent identifier is logged and the link silently dropped —
    /// the message remains retrievable by ID, conversation, and author, but
    /// never appears in any child list, even if the parent arrives later.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::DuplicateMessage`] if the identifier is already
    ///   stored
    /// - [`RepositoryError::PersistenceTimeout`] if the durable write
    ///   exceeds the configured bound
    /// - [`RepositoryError::Persistence`] if the durable write fails; the
    ///   in-memory state is left unchanged and the message is not
    ///   considered committed
    pub async fn insert(&self, message: Message) -> RepositoryResult<()> {
        // This pre-check avoids persisting an obvious duplicate but is not
        // relied on for correctness: the id is re-checked under the write
        // lock to close the TOCTOU window between check and commit.
        {
            let state = self.read_state()?;
            if state.by_id.contains_key(&message.id()) {
                return Err(RepositoryError::DuplicateMessage(message.id()));
            }
        }

        self.write_through_bounded(&message).await?;

        let mut state = self.write_state()?;
        if state.by_id.contains_key(&message.id()) {
            return Err(RepositoryError::DuplicateMessage(message.id()));
        }
        state.append(message);
        Ok(())
    }

    /// Seeds the repository from the durable store.
    ///
    /// Intended to run once at process start; a failure here is fatal to
    /// initialisation. Returns the number of messages loaded.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] or
    /// [`RepositoryError::Connection`] if the durable store is unreachable
    /// or a record cannot be read; in-memory state is left unchanged.
    pub async fn load(&self) -> RepositoryResult<usize> {
        let messages = self.durable.load_all().await?;
        let count = messages.len();
        self.replace_all(messages)?;
        debug!(count, "seeded repository from durable store");
        Ok(count)
    }

    /// Replaces the authoritative sequence wholesale and rebuilds every
    /// index from scratch.
    ///
    /// Unlike [`insert`](Self::insert), reply links are resolved in two
    /// passes, so after replacement every reply whose parent appears
    /// anywhere in `messages` is linked regardless of input ordering.
    /// Replaying the same sequence twice yields identical query results.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Connection`] if the repository lock is
    /// poisoned.
    pub fn replace_all(&self, messages: Vec<Message>) -> RepositoryResult<()> {
        let mut state = self.write_state()?;
        *state = RepositoryState::rebuild(messages);
        Ok(())
    }

    /// Returns the message with the given identifier, or `None`.
    ///
    /// A miss is an ordinary outcome, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Connection`] if the repository lock is
    /// poisoned.
    pub fn message_by_id(&self, id: MessageId) -> RepositoryResult<Option<Message>> {
        let state = self.read_state()?;
        Ok(state
            .by_id
            .get(&id)
            .and_then(|&position| state.messages.get(position))
            .cloned())
    }

    /// Returns every message in the given conversation, insertion order
    /// preserved.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Connection`] if the repository lock is
    /// poisoned.
    pub fn messages_in_conversation(
        &self,
        conversation_id: ConversationId,
    ) -> RepositoryResult<Vec<Message>> {
        let state = self.read_state()?;
        Ok(state
            .by_conversation
            .get(&conversation_id)
            .map(|positions| state.collect(positions))
            .unwrap_or_default())
    }

    /// Returns every message authored by the given user, insertion order
    /// preserved.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Connection`] if the repository lock is
    /// poisoned.
    pub fn messages_by_author(&self, author_id: UserId) -> RepositoryResult<Vec<Message>> {
        let state = self.read_state()?;
        Ok(state
            .by_author
            .get(&author_id)
            .map(|positions| state.collect(positions))
            .unwrap_or_default())
    }

    /// Returns the direct replies to the given message, insertion order
    /// preserved.
    ///
    /// The returned vector is an owned copy; mutating it cannot corrupt
    /// repository state. An unknown key yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Connection`] if the repository lock is
    /// poisoned.
    pub fn child_messages(&self, parent_id: MessageId) -> RepositoryResult<Vec<Message>> {
        let state = self.read_state()?;
        Ok(state
            .children
            .get(&parent_id)
            .map(|positions| state.collect(positions))
            .unwrap_or_default())
    }

    /// Returns the full authoritative message sequence.
    ///
    /// Clones every stored message; intended for administrative aggregate
    /// computations, not per-request rendering. Use with caution on large
    /// datasets.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Connection`] if the repository lock is
    /// poisoned.
    pub fn all_messages(&self) -> RepositoryResult<Vec<Message>> {
        let state = self.read_state()?;
        Ok(state.messages.clone())
    }

    /// Returns a newest-first slice of the authoritative sequence.
    ///
    /// `offset` skips the most recent messages, `limit` caps the slice
    /// length; the activity page reads `recent_messages(0, 25)`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Connection`] if the repository lock is
    /// poisoned.
    pub fn recent_messages(&self, offset: usize, limit: usize) -> RepositoryResult<Vec<Message>> {
        let state = self.read_state()?;
        Ok(state
            .messages
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    /// Returns the number of stored messages in O(1).
    ///
    /// Returns `0` if the internal lock is poisoned, matching the fallback
    /// behaviour of an empty repository. For error-propagating access, use
    /// the query operations instead.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .read()
            .map(|state| state.messages.len())
            .unwrap_or(0)
    }

    /// Returns `true` if no messages are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs the durable write under the configured timeout.
    async fn write_through_bounded(&self, message: &Message) -> RepositoryResult<()> {
        let limit = self.config.write_timeout();
        match tokio::time::timeout(limit, self.durable.write_through(message)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(RepositoryError::PersistenceTimeout { limit }),
        }
    }

    fn read_state(&self) -> RepositoryResult<RwLockReadGuard<'_, RepositoryState>> {
        self.state
            .read()
            .map_err(|e| RepositoryError::connection(format!("lock poisoned: {e}")))
    }

    fn write_state(&self) -> RepositoryResult<RwLockWriteGuard<'_, RepositoryState>> {
        self.state
            .write()
            .map_err(|e| RepositoryError::connection(format!("lock poisoned: {e}")))
    }
}
