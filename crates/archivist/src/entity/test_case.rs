//! A single test case result recorded for a build.

use chrono::Duration;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One test case from a build's test report.
///
/// Bulky output streams live in the companion `test_log` row so listing
/// results stays cheap.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "test_case")]
pub struct Model {
    /// Internal identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Build this result belongs to.
    pub build_id: Uuid,

    /// Fully qualified class name, e.g. `com.example.SmokeTest`.
    pub class_name: String,

    /// Test name. Some report formats append a suite label after an `@`
    /// separator.
    pub name: String,

    /// Outcome label as reported (`PASSED`, `FAILED`, `SKIPPED`, ...).
    pub status: String,

    /// Execution time in whole seconds.
    pub duration_secs: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::build::Entity",
        from = "Column::BuildId",
        to = "super::build::Column::Id"
    )]
    Build,
    #[sea_orm(has_one = "super::test_log::Entity")]
    TestLog,
}

impl Related<super::build::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Build.def()
    }
}

impl Related<super::test_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Execution time as a [`chrono::Duration`].
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::seconds(self.duration_secs)
    }

    /// Suite label encoded in the name after an `@` separator, or the
    /// full name when there is none.
    #[must_use]
    pub fn suite_name(&self) -> &str {
        match self.name.split_once('@') {
            Some((_, suite)) => suite.trim(),
            None => self.name.as_str(),
        }
    }
}
