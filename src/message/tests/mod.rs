//! Unit tests for the message module.
//!
//! Tests are organised by concern, covering happy paths, error cases, and
//! edge cases for all public APIs.
