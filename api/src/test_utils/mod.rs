//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The mocks are plain in-memory implementations of the port traits with a
//! switch to simulate an unavailable backend, so tests can check both the
//! happy path and the error mapping without a database or Redis.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
