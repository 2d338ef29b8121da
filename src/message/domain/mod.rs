//! Domain types for the message subsystem.
//!
//! This module contains pure domain types with no infrastructure
//! dependencies. All types are immutable after construction and
//! serialisable via serde.

mod ids;
mod message;

pub use ids::{ConversationId, MessageId, UserId};
pub use message::{Message, MessageBuilder, MessageBuilderError, PersistedMessageData};
