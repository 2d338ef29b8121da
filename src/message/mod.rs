//! Threaded message storage for Palaver.
//!
//! This module implements the message repository: the single source of truth
//! for message state during a process's lifetime. Messages flow one way into
//! the repository (inserts from request handlers, a bulk load from the
//! durable store at startup) and callers pull owned read views back out.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure domain types ([`domain::Message`], [`domain::MessageId`],
//!   [`domain::ConversationId`], [`domain::UserId`])
//! - **Ports**: Abstract trait interfaces ([`ports::durable_store::DurableStore`])
//! - **Adapters**: Concrete implementations
//!   ([`adapters::memory::InMemoryDurableStore`],
//!   [`adapters::postgres::PostgresDurableStore`])
//! - **Repository**: The indexed in-memory store
//!   ([`repository::MessageRepository`])
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use palaver::message::adapters::memory::InMemoryDurableStore;
//! use palaver::message::domain::{ConversationId, Message, UserId};
//! use palaver::message::repository::MessageRepository;
//! use mockable::DefaultClock;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runtime = tokio::runtime::Runtime::new()?;
//! runtime.block_on(async {
//!     let repo = MessageRepository::new(Arc::new(InMemoryDurableStore::new()));
//!     let clock = DefaultClock;
//!     let conversation_id = ConversationId::new();
//!     let message = Message::new(conversation_id, UserId::new(), "Hello!", &clock)?;
//!     repo.insert(message).await?;
//!     assert_eq!(repo.len(), 1);
//!     Ok(())
//! })
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod repository;

#[cfg(test)]
mod tests;
