use sea_orm::DbErr;
use thiserror::Error;

/// Errors surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    /// No Jenkins configuration row exists yet.
    #[error("Jenkins configuration not found in the database")]
    MissingConfiguration,

    /// More than one Jenkins configuration row exists; the sync pass
    /// cannot tell which server to talk to.
    #[error("{count} Jenkins configurations found in the database, remove the unused ones")]
    MultipleConfigurations { count: u64 },
}

/// Shorthand for storage results.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_read_well() {
        assert_eq!(
            RepositoryError::MissingConfiguration.to_string(),
            "Jenkins configuration not found in the database"
        );
        assert_eq!(
            RepositoryError::MultipleConfigurations { count: 3 }.to_string(),
            "3 Jenkins configurations found in the database, remove the unused ones"
        );
    }
}
