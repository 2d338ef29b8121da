//! Diesel row models for message persistence.

use super::schema::messages;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::message::domain::{
    ConversationId, Message, MessageId, PersistedMessageData, UserId,
};

/// Query result row for message records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageRow {
    /// Message identifier.
    pub id: uuid::Uuid,
    /// Conversation the message belongs to.
    pub conversation_id: uuid::Uuid,
    /// Author of the message.
    pub author_id: uuid::Uuid,
    /// Optional reply-thread parent.
    pub parent_id: Option<uuid::Uuid>,
    /// Textual content.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Monotonic write position assigned by the database.
    pub seq: i64,
}

/// Insert model for message records.
///
/// Omits `seq`; the database assigns the write position.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessageRow {
    /// Message identifier.
    pub id: uuid::Uuid,
    /// Conversation the message belongs to.
    pub conversation_id: uuid::Uuid,
    /// Author of the message.
    pub author_id: uuid::Uuid,
    /// Optional reply-thread parent.
    pub parent_id: Option<uuid::Uuid>,
    /// Textual content.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewMessageRow {
    /// Builds an insert row from a domain message.
    #[must_use]
    pub fn from_message(message: &Message) -> Self {
        Self {
            id: message.id().into_inner(),
            conversation_id: message.conversation_id().into_inner(),
            author_id: message.author_id().into_inner(),
            parent_id: message.parent_id().map(MessageId::into_inner),
            content: message.content().to_owned(),
            created_at: message.created_at(),
        }
    }
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        let MessageRow {
            id,
            conversation_id,
            author_id,
            parent_id,
            content,
            created_at,
            ..
        } = row;

        Self::from_persisted(PersistedMessageData {
            id: MessageId::from_uuid(id),
            conversation_id: ConversationId::from_uuid(conversation_id),
            author_id: UserId::from_uuid(author_id),
            parent_id: parent_id.map(MessageId::from_uuid),
            content,
            created_at,
        })
    }
}
