//! Storage operations for builds.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::entity::build::{ActiveModel, Column, Entity as Build, Model};

use super::errors::{RepositoryError, Result};

/// Look a build up by its `(job, number)` key.
pub async fn find_by_job_and_number(
    db: &DatabaseConnection,
    job_id: Uuid,
    number: i32,
) -> Result<Option<Model>> {
    Build::find()
        .filter(Column::JobId.eq(job_id))
        .filter(Column::Number.eq(number))
        .one(db)
        .await
        .map_err(RepositoryError::from)
}

/// True when a build row exists for the `(job, number)` key.
pub async fn exists(db: &DatabaseConnection, job_id: Uuid, number: i32) -> Result<bool> {
    let count = Build::find()
        .filter(Column::JobId.eq(job_id))
        .filter(Column::Number.eq(number))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// All builds of a job still marked as in progress, oldest number first.
pub async fn find_building(db: &DatabaseConnection, job_id: Uuid) -> Result<Vec<Model>> {
    Build::find()
        .filter(Column::JobId.eq(job_id))
        .filter(Column::Building.eq(true))
        .order_by_asc(Column::Number)
        .all(db)
        .await
        .map_err(RepositoryError::from)
}

/// Insert a newly discovered build.
pub async fn insert(db: &DatabaseConnection, build: ActiveModel) -> Result<Model> {
    build.insert(db).await.map_err(RepositoryError::from)
}

/// Rewrite an existing build row.
pub async fn update(db: &DatabaseConnection, build: ActiveModel) -> Result<Model> {
    build.update(db).await.map_err(RepositoryError::from)
}

/// Number of builds stored for a job.
pub async fn count_by_job(db: &DatabaseConnection, job_id: Uuid) -> Result<u64> {
    Build::find()
        .filter(Column::JobId.eq(job_id))
        .count(db)
        .await
        .map_err(RepositoryError::from)
}
