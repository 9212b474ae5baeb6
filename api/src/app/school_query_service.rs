//! School query service
//!
//! Ranks schools by great-circle distance from a caller-supplied point.

use std::sync::Arc;

use crate::app::schemas::{parse_location, LocationQuery};
use crate::domain::entities::{Coordinates, RankedSchool, School};
use crate::domain::ports::SchoolRepository;
use crate::error::ServiceError;

/// Service for reading schools
pub struct SchoolQueryService<SR>
where
    SR: SchoolRepository,
{
    schools: Arc<SR>,
}

impl<SR> SchoolQueryService<SR>
where
    SR: SchoolRepository,
{
    pub fn new(schools: Arc<SR>) -> Self {
        Self { schools }
    }

    /// List every school, nearest first
    ///
    /// Reads the full table and ranks in memory, so cost grows linearly
    /// with the number of schools.
    pub async fn list_by_distance(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<RankedSchool>, ServiceError> {
        let origin = parse_location(query)?;

        let schools = self.schools.find_all().await?;
        let ranked = rank_by_distance(&origin, schools);
        tracing::debug!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            count = ranked.len(),
            "Ranked schools by distance"
        );

        Ok(ranked)
    }
}

/// Annotate each school with its distance from `origin` and sort ascending.
///
/// The sort is stable: schools at the same distance keep their input order.
pub fn rank_by_distance(origin: &Coordinates, schools: Vec<School>) -> Vec<RankedSchool> {
    let mut ranked: Vec<RankedSchool> = schools
        .into_iter()
        .map(|school| RankedSchool::from_origin(origin, school))
        .collect();
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}
