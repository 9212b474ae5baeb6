//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;
pub mod redis;

pub use self::postgres::PostgresSchoolRepository;
pub use self::redis::RedisRateLimitStore;
