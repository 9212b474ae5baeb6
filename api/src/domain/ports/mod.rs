//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod rate_limit;
pub mod repositories;

pub use rate_limit::{RateLimitStore, WindowHits};
pub use repositories::SchoolRepository;
