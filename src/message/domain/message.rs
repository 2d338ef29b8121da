//! The Message aggregate root representing a single posted message.
//!
//! Messages are immutable after creation and are never mutated or deleted
//! through the repository's public surface.

use super::{ConversationId, MessageId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A message posted in a conversation.
///
/// Messages are the atomic unit of board history in Palaver. They are
/// immutable after creation; a message is created once by the caller layer,
/// handed to the repository via insertion, and destroyed only with process
/// teardown or explicit bulk replacement during load.
///
/// # Invariants
///
/// - `id` is unique across the repository's lifetime and never changes
/// - `conversation_id` is immutable
/// - `content` is non-empty (enforced at construction)
/// - `parent_id`, when present, names the message this one replies to; the
///   repository does not validate that the parent exists
///
/// # Examples
///
/// ```
/// use palaver::message::domain::{ConversationId, Message, UserId};
/// use mockable::DefaultClock;
///
/// let clock = DefaultClock;
/// let message = Message::new(ConversationId::new(), UserId::new(), "Hello!", &clock)
///     .expect("valid message");
///
/// assert!(message.parent_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message.
    id: MessageId,

    /// The conversation this message belongs to.
    conversation_id: ConversationId,

    /// The user who authored this message.
    author_id: UserId,

    /// The message this one replies to, absent for top-level messages.
    parent_id: Option<MessageId>,

    /// The textual content of the message.
    content: String,

    /// When the message was created.
    created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new top-level message with a random identifier and the
    /// current timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`MessageBuilderError::EmptyContent`] if the content is empty
    /// or whitespace-only.
    ///
    /// # Examples
    ///
    /// ```
    /// use palaver::message::domain::{ConversationId, Message, UserId};
    /// use mockable::DefaultClock;
    ///
    /// let clock = DefaultClock;
    /// let result = Message::new(ConversationId::new(), UserId::new(), "Hello", &clock);
    /// assert!(result.is_ok());
    /// ```
    pub fn new(
        conversation_id: ConversationId,
        author_id: UserId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, MessageBuilderError> {
        Self::builder(conversation_id, author_id)
            .with_content(content)
            .build(clock)
    }

    /// Creates a reply to an existing message.
    ///
    /// The repository links the reply into the parent's child list only if
    /// the parent is already stored; see
    /// [`MessageRepository::insert`](crate::message::repository::MessageRepository::insert).
    ///
    /// # Errors
    ///
    /// Returns [`MessageBuilderError::EmptyContent`] if the content is empty
    /// or whitespace-only.
    pub fn reply(
        conversation_id: ConversationId,
        author_id: UserId,
        parent_id: MessageId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, MessageBuilderError> {
        Self::builder(conversation_id, author_id)
            .with_parent(parent_id)
            .with_content(content)
            .build(clock)
    }

    /// Reconstructs a message from previously persisted data.
    ///
    /// Trusts the durable store: content validation is not re-applied, and
    /// the persisted identifier and timestamp are kept as-is.
    #[must_use]
    pub fn from_persisted(data: PersistedMessageData) -> Self {
        let PersistedMessageData {
            id,
            conversation_id,
            author_id,
            parent_id,
            content,
            created_at,
        } = data;

        Self {
            id,
            conversation_id,
            author_id,
            parent_id,
            content,
            created_at,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the conversation identifier.
    #[must_use]
    pub const fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    /// Returns the author identifier.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the identifier of the message this one replies to, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<MessageId> {
        self.parent_id
    }

    /// Returns the textual content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns a builder for constructing messages with full control over
    /// optional fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use palaver::message::domain::{ConversationId, Message, MessageId, UserId};
    /// use mockable::DefaultClock;
    ///
    /// let clock = DefaultClock;
    /// let parent = MessageId::new();
    /// let message = Message::builder(ConversationId::new(), UserId::new())
    ///     .with_parent(parent)
    ///     .with_content("A reply")
    ///     .build(&clock)
    ///     .expect("valid message");
    ///
    /// assert_eq!(message.parent_id(), Some(parent));
    /// ```
    #[must_use]
    pub fn builder(conversation_id: ConversationId, author_id: UserId) -> MessageBuilder {
        MessageBuilder::new(conversation_id, author_id)
    }
}

/// Builder for constructing messages with full control over all fields.
#[derive(Debug)]
pub struct MessageBuilder {
    id: Option<MessageId>,
    conversation_id: ConversationId,
    author_id: UserId,
    parent_id: Option<MessageId>,
    content: String,
}

impl MessageBuilder {
    /// Creates a new message builder.
    #[must_use]
    pub const fn new(conversation_id: ConversationId, author_id: UserId) -> Self {
        Self {
            id: None,
            conversation_id,
            author_id,
            parent_id: None,
            content: String::new(),
        }
    }

    /// Sets a specific message ID.
    #[must_use]
    #[expect(
        clippy::missing_const_for_fn,
        reason = "Option::Some with Copy type should be const but isn't stable"
    )]
    pub fn with_id(mut self, id: MessageId) -> Self {
        self.id = Some(id);
        self
    }

    /// Marks the message as a reply to the given parent.
    #[must_use]
    #[expect(
        clippy::missing_const_for_fn,
        reason = "Option::Some with Copy type should be const but isn't stable"
    )]
    pub fn with_parent(mut self, parent_id: MessageId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the textual content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Builds the message, stamping it with the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns [`MessageBuilderError::EmptyContent`] if no content was set
    /// or the content is whitespace-only.
    pub fn build(self, clock: &impl Clock) -> Result<Message, MessageBuilderError> {
        if self.content.trim().is_empty() {
            return Err(MessageBuilderError::EmptyContent);
        }

        Ok(Message {
            id: self.id.unwrap_or_default(),
            conversation_id: self.conversation_id,
            author_id: self.author_id,
            parent_id: self.parent_id,
            content: self.content,
            created_at: clock.utc(),
        })
    }
}

/// Errors that can occur when building a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageBuilderError {
    /// The message content is empty.
    #[error("message content must not be empty")]
    EmptyContent,
}

/// Raw field set for reconstructing a [`Message`] from the durable store.
///
/// Used by durable store adapters and by bulk-load seeding in tests; the
/// field set mirrors the persisted row exactly.
#[derive(Debug, Clone)]
pub struct PersistedMessageData {
    /// Persisted message identifier.
    pub id: MessageId,
    /// Conversation the message belongs to.
    pub conversation_id: ConversationId,
    /// Author of the message.
    pub author_id: UserId,
    /// Optional reply-thread parent.
    pub parent_id: Option<MessageId>,
    /// Textual content.
    pub content: String,
    /// Original creation timestamp.
    pub created_at: DateTime<Utc>,
}
