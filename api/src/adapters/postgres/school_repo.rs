//! PostgreSQL adapter for SchoolRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::domain::entities::{NewSchool, School, SchoolId};
use crate::domain::ports::SchoolRepository;
use crate::entity::schools;
use crate::error::DomainError;

/// PostgreSQL implementation of SchoolRepository
pub struct PostgresSchoolRepository {
    db: DatabaseConnection,
}

impl PostgresSchoolRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SchoolRepository for PostgresSchoolRepository {
    async fn create(&self, school: &NewSchool) -> Result<School, DomainError> {
        let model = schools::ActiveModel {
            name: Set(school.name.clone()),
            address: Set(school.address.clone()),
            latitude: Set(school.latitude),
            longitude: Set(school.longitude),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotInserted => {
                DomainError::Internal("school insert returned no row".to_string())
            }
            other => DomainError::Database(other.to_string()),
        })?;

        Ok(result.into())
    }

    async fn find_all(&self) -> Result<Vec<School>, DomainError> {
        // Serial ids follow insertion order
        let results = schools::Entity::find()
            .order_by_asc(schools::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<schools::Model> for School {
    fn from(model: schools::Model) -> Self {
        School {
            id: SchoolId(model.id),
            name: model.name,
            address: model.address,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }
}
