//! Captured output for a test case.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Output streams and failure trace captured for one test case.
///
/// Kept apart from `test_case` because these columns can hold large
/// blobs. At most one row exists per case.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "test_log")]
pub struct Model {
    /// Internal identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning test case. Unique.
    pub test_case_id: Uuid,

    /// Stack trace of the failure, when the case failed with one.
    #[sea_orm(column_type = "Text", nullable)]
    pub error_stack_trace: Option<String>,

    /// Captured standard output.
    #[sea_orm(column_type = "Text", nullable)]
    pub stdout: Option<String>,

    /// Captured standard error.
    #[sea_orm(column_type = "Text", nullable)]
    pub stderr: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::test_case::Entity",
        from = "Column::TestCaseId",
        to = "super::test_case::Column::Id"
    )]
    TestCase,
}

impl Related<super::test_case::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestCase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// True when no stream or trace was captured at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.error_stack_trace.is_none() && self.stdout.is_none() && self.stderr.is_none()
    }
}
