//! Step definitions for reply-thread linking BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
