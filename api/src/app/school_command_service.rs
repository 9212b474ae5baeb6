//! School command service
//!
//! Handles school creation.

use std::sync::Arc;

use serde_json::Value;

use crate::app::schemas::parse_new_school;
use crate::domain::entities::School;
use crate::domain::ports::SchoolRepository;
use crate::error::ServiceError;

/// Service for writing schools
pub struct SchoolCommandService<SR>
where
    SR: SchoolRepository,
{
    schools: Arc<SR>,
}

impl<SR> SchoolCommandService<SR>
where
    SR: SchoolRepository,
{
    pub fn new(schools: Arc<SR>) -> Self {
        Self { schools }
    }

    /// Validate a request body and insert the school it describes
    ///
    /// Nothing reaches the repository unless the whole body is valid. The
    /// insert is a single repository call, so a failure leaves no partial
    /// record behind.
    pub async fn create_school(&self, body: &Value) -> Result<School, ServiceError> {
        let new_school = parse_new_school(body)?;

        let school = self.schools.create(&new_school).await?;
        tracing::info!(school_id = %school.id, name = %school.name, "School created");

        Ok(school)
    }
}
