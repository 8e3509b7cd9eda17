//! One recorded execution of a tracked job.

use chrono::Duration;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single numbered execution of a job.
///
/// Rows are keyed by `(job_id, number)`. A row is created the first time
/// its number appears inside the discovery window and is rewritten on
/// each pass while `building` is true. Once the remote reports the build
/// finished and its tests are recorded, the row is never touched again.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "build")]
pub struct Model {
    // ─── Identity ───────────────────────────────────────────────────────
    /// Internal identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning job.
    pub job_id: Uuid,

    /// Build number, monotonically assigned per job by Jenkins.
    pub number: i32,

    // ─── Remote state ───────────────────────────────────────────────────
    /// Final verdict (`SUCCESS`, `FAILURE`, `ABORTED`, ...). Null while
    /// the build is still running.
    pub result: Option<String>,

    /// Wall-clock duration in milliseconds as reported by Jenkins.
    pub duration_ms: i64,

    /// Start time, localized from the remote epoch-milliseconds value.
    pub timestamp: DateTimeWithTimeZone,

    /// Who or what triggered the build. Null when no trigger cause
    /// matched.
    pub started_by: Option<String>,

    /// True while the remote build was still executing at the last sync.
    pub building: bool,

    // ─── Bookkeeping ────────────────────────────────────────────────────
    /// Last time a sync pass wrote this row.
    pub synced_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job::Entity",
        from = "Column::JobId",
        to = "super::job::Column::Id"
    )]
    Job,
    #[sea_orm(has_many = "super::test_case::Entity")]
    TestCase,
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl Related<super::test_case::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestCase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Reported duration as a [`chrono::Duration`].
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::milliseconds(self.duration_ms)
    }

    /// True once the remote build finished and the row will no longer
    /// change.
    #[must_use]
    pub fn is_final(&self) -> bool {
        !self.building
    }
}
