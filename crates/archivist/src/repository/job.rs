//! Storage operations for tracked jobs.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::job::{ActiveModel, Column, Entity as Job, Model};

use super::errors::{RepositoryError, Result};

/// All tracked jobs, ordered by display name.
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>> {
    Job::find()
        .order_by_asc(Column::Name)
        .all(db)
        .await
        .map_err(RepositoryError::from)
}

/// Look a job up by its Jenkins path.
pub async fn find_by_path(db: &DatabaseConnection, jenkins_path: &str) -> Result<Option<Model>> {
    Job::find()
        .filter(Column::JenkinsPath.eq(jenkins_path))
        .one(db)
        .await
        .map_err(RepositoryError::from)
}

/// Start tracking a job.
pub async fn insert(db: &DatabaseConnection, jenkins_path: &str, name: &str) -> Result<Model> {
    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        jenkins_path: Set(jenkins_path.to_string()),
        name: Set(name.to_string()),
        created_at: Set(Utc::now().fixed_offset()),
    };
    active.insert(db).await.map_err(RepositoryError::from)
}

/// Persist a refreshed display name.
pub async fn update_name(db: &DatabaseConnection, job: Model, name: &str) -> Result<Model> {
    let mut active: ActiveModel = job.into();
    active.name = Set(name.to_string());
    active.update(db).await.map_err(RepositoryError::from)
}

/// Stop tracking a job. Builds, test cases, and logs cascade away via
/// foreign keys. Returns the number of job rows removed.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<u64> {
    let result = Job::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}
