//! Palaver: threaded message-board storage core.
//!
//! This crate implements the message repository at the heart of the Palaver
//! message board: an in-memory store of chat messages indexed by
//! conversation, by author, and by reply-thread parent, write-through
//! persisted to a durable backing store.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure domain types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! The presentation layer (HTTP routing, view rendering, sessions, admin
//! statistics, user/conversation CRUD) lives outside this crate and consumes
//! the repository through its public operations.
//!
//! # Modules
//!
//! - [`message`]: Message domain types, the repository, and its durable
//!   storage port and adapters

pub mod message;
