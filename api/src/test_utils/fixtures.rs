//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use serde_json::{json, Value};

use crate::domain::entities::{School, SchoolId};

/// Create a test school with default values
pub fn test_school() -> School {
    School {
        id: SchoolId(1),
        name: "Alpha".to_string(),
        address: "1 Main St".to_string(),
        latitude: 10.0,
        longitude: 20.0,
    }
}

/// Create a test school at a specific location
pub fn test_school_at(id: i32, name: &str, latitude: f64, longitude: f64) -> School {
    School {
        id: SchoolId(id),
        name: name.to_string(),
        address: format!("{} Main St", id),
        latitude,
        longitude,
    }
}

/// A valid create-school request body
pub fn new_school_body() -> Value {
    json!({
        "name": "Alpha",
        "address": "1 Main St",
        "latitude": 10,
        "longitude": 20
    })
}
