//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod school_repo;


pub use school_repo::PostgresSchoolRepository;
