//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod schools;

pub use schools::{create_school, list_schools, not_found};
