//! Input contracts for the school endpoints

use serde_json::Value;

use crate::domain::entities::{Coordinates, NewSchool};
use crate::domain::validation::{
    coerce_number_in, require_number_in, require_object, require_string, ValidationErrors,
};

/// Raw query parameters for ranking schools by distance
///
/// Values stay as text until `parse_location` coerces them.
#[derive(Debug, Default)]
pub struct LocationQuery {
    pub user_lat: Option<String>,
    pub user_lon: Option<String>,
}

impl LocationQuery {
    /// Collect `userLat`/`userLon` from decoded query pairs
    ///
    /// A repeated parameter keeps every value joined with commas, the text
    /// a list of values converts to, so it fails numeric coercion at its
    /// own path. Other parameters are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "userLat" => &mut query.user_lat,
                "userLon" => &mut query.user_lon,
                _ => continue,
            };
            *slot = Some(match slot.take() {
                Some(existing) => format!("{},{}", existing, value),
                None => value,
            });
        }
        query
    }
}

/// Validate a create-school request body
pub fn parse_new_school(body: &Value) -> Result<NewSchool, ValidationErrors> {
    let object = require_object(body)?;
    let mut errors = ValidationErrors::new();

    let name = require_string(object, "name", 1, "Name is required", &mut errors);
    let address = require_string(object, "address", 1, "Address is required", &mut errors);
    let latitude = require_number_in(
        object,
        "latitude",
        &Coordinates::LATITUDE_RANGE,
        &mut errors,
    );
    let longitude = require_number_in(
        object,
        "longitude",
        &Coordinates::LONGITUDE_RANGE,
        &mut errors,
    );

    match (name, address, latitude, longitude) {
        (Some(name), Some(address), Some(latitude), Some(longitude)) => Ok(NewSchool {
            name,
            address,
            latitude,
            longitude,
        }),
        _ => Err(errors),
    }
}

/// Coerce and bound-check the caller's coordinates
pub fn parse_location(query: &LocationQuery) -> Result<Coordinates, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let latitude = coerce_number_in(
        query.user_lat.as_deref(),
        "userLat",
        &Coordinates::LATITUDE_RANGE,
        &mut errors,
    );
    let longitude = coerce_number_in(
        query.user_lon.as_deref(),
        "userLon",
        &Coordinates::LONGITUDE_RANGE,
        &mut errors,
    );

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)),
        _ => Err(errors),
    }
}
