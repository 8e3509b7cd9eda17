//! Storage operations for captured test output.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::test_log::{ActiveModel, Column, Entity as TestLog, Model};

use super::errors::{RepositoryError, Result};

/// Record the captured output for one test case.
pub async fn insert(db: &DatabaseConnection, log: ActiveModel) -> Result<Model> {
    log.insert(db).await.map_err(RepositoryError::from)
}

/// Captured output for a test case, when any was recorded.
pub async fn find_by_test_case(
    db: &DatabaseConnection,
    test_case_id: Uuid,
) -> Result<Option<Model>> {
    TestLog::find()
        .filter(Column::TestCaseId.eq(test_case_id))
        .one(db)
        .await
        .map_err(RepositoryError::from)
}
