use thiserror::Error;

use crate::jenkins::JenkinsError;
use crate::repository::RepositoryError;

/// Errors raised while synchronizing a job or reconciling a build.
///
/// Inside a pass these are formatted into the report's error strings as
/// `<kind> - <message>`; only configuration preconditions and the job
/// listing escape the pass as hard failures.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The CI server could not be queried or answered unusably.
    #[error(transparent)]
    Client(#[from] JenkinsError),

    /// Local storage failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// An update expected a stored build row that is missing.
    #[error("no stored row for build #{number} although it was selected for update")]
    MissingBuildRow { number: i32 },

    /// The remote start time cannot be represented as a local timestamp.
    #[error("build timestamp {millis} ms is out of range")]
    InvalidTimestamp { millis: i64 },
}

impl SyncError {
    /// Short stable label for aggregated error strings.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::Client(e) => e.kind(),
            SyncError::Repository(_) => "Repository",
            SyncError::MissingBuildRow { .. } => "MissingBuildRow",
            SyncError::InvalidTimestamp { .. } => "InvalidTimestamp",
        }
    }
}
