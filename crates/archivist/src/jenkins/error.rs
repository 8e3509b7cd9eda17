use thiserror::Error;

use crate::http::HttpError;

/// Errors returned by the Jenkins REST client.
#[derive(Debug, Error)]
pub enum JenkinsError {
    /// The request never completed.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The server answered with a non-success status code.
    #[error("request for resource \"{url}\" returned status code {status}")]
    Status { status: u16, url: String },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response from \"{url}\": {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl JenkinsError {
    /// Short stable label for aggregated error reporting.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            JenkinsError::Transport(_) => "Transport",
            JenkinsError::Status { .. } => "Status",
            JenkinsError::Decode { .. } => "Decode",
        }
    }
}
