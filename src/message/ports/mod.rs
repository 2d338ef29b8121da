//! Port trait definitions for the message subsystem.
//!
//! Ports define the abstract interfaces that the repository requires from
//! infrastructure. Adapters implement these ports to connect the repository
//! to databases and other backing services.

pub mod durable_store;

pub use durable_store::DurableStore;
