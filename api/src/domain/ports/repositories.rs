//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{NewSchool, School};
use crate::error::DomainError;

/// Repository for School entities
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// Insert a school and return it with its assigned ID
    async fn create(&self, school: &NewSchool) -> Result<School, DomainError>;

    /// Fetch every school, oldest first
    async fn find_all(&self) -> Result<Vec<School>, DomainError>;
}
