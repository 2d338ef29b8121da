//! `PostgreSQL` durable store adapter built on Diesel.
//!
//! Expects a `messages` table matching [`schema::messages`], with a
//! `BIGSERIAL` `seq` column recording write order; see
//! [`store::PostgresDurableStore`].

pub mod models;
pub mod schema;
pub mod store;

pub use store::{MessagePgPool, PostgresDurableStore};
