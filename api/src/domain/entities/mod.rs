//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod school;

pub use school::{Coordinates, NewSchool, RankedSchool, School, SchoolId};
