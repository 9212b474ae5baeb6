//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing schools and coordinates
//! - `geo`: Great-circle distance
//! - `ports`: Trait definitions for external dependencies
//! - `validation`: Field-level validation issues

pub mod entities;
pub mod geo;
pub mod ports;
pub mod validation;
