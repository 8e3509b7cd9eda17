//! Storage operations for the Jenkins configuration singleton.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

use crate::entity::configuration::{ActiveModel, Entity as Configuration, Model};

use super::errors::{RepositoryError, Result};

/// Load the configuration singleton.
///
/// Exactly one row must exist. Zero rows and duplicate rows are distinct
/// errors so callers can explain both states to the operator.
pub async fn find_singleton(db: &DatabaseConnection) -> Result<Model> {
    let mut rows = Configuration::find().all(db).await?;
    match rows.len() {
        1 => Ok(rows.remove(0)),
        0 => Err(RepositoryError::MissingConfiguration),
        n => Err(RepositoryError::MultipleConfigurations { count: n as u64 }),
    }
}

/// Number of configuration rows currently stored.
pub async fn count(db: &DatabaseConnection) -> Result<u64> {
    Configuration::find()
        .count(db)
        .await
        .map_err(RepositoryError::from)
}

/// Create the configuration row, or update the existing one in place.
pub async fn upsert(
    db: &DatabaseConnection,
    jenkins_url: &str,
    username: Option<&str>,
    api_token: Option<&str>,
) -> Result<Model> {
    match Configuration::find().one(db).await? {
        Some(existing) => {
            let mut active: ActiveModel = existing.into();
            active.jenkins_url = Set(jenkins_url.to_string());
            active.username = Set(username.map(str::to_string));
            active.api_token = Set(api_token.map(str::to_string));
            active.update(db).await.map_err(RepositoryError::from)
        }
        None => {
            let active = ActiveModel {
                id: Set(Uuid::new_v4()),
                jenkins_url: Set(jenkins_url.to_string()),
                username: Set(username.map(str::to_string)),
                api_token: Set(api_token.map(str::to_string)),
                created_at: Set(Utc::now().fixed_offset()),
            };
            active.insert(db).await.map_err(RepositoryError::from)
        }
    }
}
