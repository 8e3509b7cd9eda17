//! Storage operations for test case results.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::entity::test_case::{ActiveModel, Column, Entity as TestCase, Model};

use super::errors::{RepositoryError, Result};

/// Record one test case result.
pub async fn insert(db: &DatabaseConnection, case: ActiveModel) -> Result<Model> {
    case.insert(db).await.map_err(RepositoryError::from)
}

/// All cases recorded for a build, ordered by class then name.
pub async fn find_by_build(db: &DatabaseConnection, build_id: Uuid) -> Result<Vec<Model>> {
    TestCase::find()
        .filter(Column::BuildId.eq(build_id))
        .order_by_asc(Column::ClassName)
        .order_by_asc(Column::Name)
        .all(db)
        .await
        .map_err(RepositoryError::from)
}

/// Number of cases recorded for a build.
pub async fn count_by_build(db: &DatabaseConnection, build_id: Uuid) -> Result<u64> {
    TestCase::find()
        .filter(Column::BuildId.eq(build_id))
        .count(db)
        .await
        .map_err(RepositoryError::from)
}
