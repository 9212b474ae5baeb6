//! School domain entity
//!
//! A physical school with a postal address and a location on the globe.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::domain::geo;

/// Unique identifier for a school, assigned by the repository on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SchoolId(pub i32);

impl std::fmt::Display for SchoolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
    pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometers
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        geo::haversine_km(self, other)
    }
}

/// A persisted school
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl School {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Data needed to create a new school
///
/// Only constructed from validated input, so the coordinates are always
/// inside their domain bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A school annotated with its distance from a reference point
///
/// Serializes flat: the school's fields followed by `distance`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSchool {
    #[serde(flatten)]
    pub school: School,
    /// Kilometers from the reference point
    pub distance: f64,
}

impl RankedSchool {
    pub fn from_origin(origin: &Coordinates, school: School) -> Self {
        let distance = origin.distance_to(&school.coordinates());
        Self { school, distance }
    }
}
