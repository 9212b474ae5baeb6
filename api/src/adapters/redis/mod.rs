//! Redis adapters
//!
//! Rate limit counters shared by every API instance.

pub mod rate_limit_store;

pub use rate_limit_store::RedisRateLimitStore;
