//! A Jenkins job tracked by the mirror.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A Jenkins job whose build history is mirrored locally.
///
/// `jenkins_path` is the stable identifier on the server; `name` is the
/// display name and is refreshed on every sync pass.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job")]
pub struct Model {
    /// Internal identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Path on the Jenkins server, folder segments separated by `/`
    /// (e.g. `platform/nightly`). Unique.
    pub jenkins_path: String,

    /// Display name as last reported by Jenkins.
    pub name: String,

    /// When this job was first tracked.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::build::Entity")]
    Build,
}

impl Related<super::build::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Build.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
