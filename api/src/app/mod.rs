//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services validate their input, then coordinate repository calls.

pub mod schemas;
pub mod school_command_service;
pub mod school_query_service;

pub use schemas::LocationQuery;
pub use school_command_service::SchoolCommandService;
pub use school_query_service::SchoolQueryService;
