//! Durable store adapters for the message module.
//!
//! This module provides concrete implementations of the [`DurableStore`]
//! port, following hexagonal architecture principles. Adapters handle all
//! infrastructure concerns while the repository remains storage-agnostic.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryDurableStore`]: Thread-safe in-memory storage for
//!   unit testing and local runs
//! - [`postgres::PostgresDurableStore`]: Production-grade `PostgreSQL`
//!   persistence using Diesel ORM
//!
//! [`DurableStore`]: crate::message::ports::durable_store::DurableStore

pub mod memory;
pub mod postgres;
