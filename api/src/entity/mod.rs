//! SeaORM entities
//!
//! Database table models. Converted into domain entities by the adapters.

pub mod schools;
