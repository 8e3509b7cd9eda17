//! Stored Jenkins connection settings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Connection settings for the Jenkins server being mirrored.
///
/// A sync pass requires exactly one row: zero rows means nothing has been
/// configured yet, more than one is ambiguous. The repository layer
/// enforces both.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "configuration")]
pub struct Model {
    /// Internal identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Base URL of the Jenkins server, e.g. `https://ci.example.com`.
    pub jenkins_url: String,

    /// Account used for API calls. Anonymous access when absent.
    pub username: Option<String>,

    /// API token paired with `username` for HTTP basic auth.
    pub api_token: Option<String>,

    /// When this row was first created.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.jenkins_url.trim_end_matches('/')
    }

    /// True when the stored account can authenticate.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.username.is_some()
    }
}
