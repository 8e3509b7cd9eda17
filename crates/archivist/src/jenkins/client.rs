use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::de::DeserializeOwned;

use crate::http::{
    HttpHeaders, HttpMethod, HttpRequest, HttpTransport, ReqwestTransport,
};

use super::error::JenkinsError;
use super::types::{JenkinsBuild, JenkinsJob, TestReport};

/// Per-request timeout for the production transport.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Field projection used when listing a job: the display name plus the
/// bare build numbers, newest first.
pub const JOB_TREE: &str = "displayName,builds[number]";

/// Client for the Jenkins JSON REST API.
///
/// All network traffic goes through an injected [`HttpTransport`], so
/// tests run against an in-memory mock. Authentication is HTTP basic with
/// a username and API token; both are optional for servers that allow
/// anonymous reads.
pub struct JenkinsClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    username: Option<String>,
    api_token: Option<String>,
}

impl JenkinsClient {
    /// Create a client backed by a real HTTP transport.
    pub fn new(
        base_url: &str,
        username: Option<String>,
        api_token: Option<String>,
    ) -> Result<Self, JenkinsError> {
        let transport = ReqwestTransport::with_timeout(REQUEST_TIMEOUT)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            base_url,
            username,
            api_token,
        ))
    }

    /// Create a client with an explicit transport.
    #[must_use]
    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        base_url: &str,
        username: Option<String>,
        api_token: Option<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            api_token,
        }
    }

    /// Fetch job metadata restricted to a `tree` field projection.
    pub async fn get_job(&self, path: &str, tree: &str) -> Result<JenkinsJob, JenkinsError> {
        let url = format!(
            "{}/job/{}/api/json?tree={}",
            self.base_url,
            job_segments(path),
            tree
        );
        self.get(&url).await
    }

    /// Fetch the metadata of one build.
    pub async fn get_build(&self, path: &str, number: i32) -> Result<JenkinsBuild, JenkinsError> {
        let url = format!(
            "{}/job/{}/{}/api/json",
            self.base_url,
            job_segments(path),
            number
        );
        self.get(&url).await
    }

    /// Fetch the test report of one build.
    ///
    /// Builds that never published a report answer 404, which surfaces as
    /// [`JenkinsError::Status`].
    pub async fn get_test_report(
        &self,
        path: &str,
        number: i32,
    ) -> Result<TestReport, JenkinsError> {
        let url = format!(
            "{}/job/{}/{}/testReport/api/json",
            self.base_url,
            job_segments(path),
            number
        );
        self.get(&url).await
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, JenkinsError> {
        let mut headers: HttpHeaders =
            vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(auth) = self.basic_auth() {
            headers.push(("Authorization".to_string(), auth));
        }

        let response = self
            .transport
            .send(HttpRequest {
                method: HttpMethod::Get,
                url: url.to_string(),
                headers,
                body: Vec::new(),
            })
            .await?;

        tracing::debug!(url, status = response.status, "jenkins response");
        if !(200..300).contains(&response.status) {
            return Err(JenkinsError::Status {
                status: response.status,
                url: url.to_string(),
            });
        }

        serde_json::from_slice(&response.body).map_err(|source| JenkinsError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn basic_auth(&self) -> Option<String> {
        let username = self.username.as_deref()?;
        let token = self.api_token.as_deref().unwrap_or_default();
        let credentials = BASE64.encode(format!("{username}:{token}"));
        Some(format!("Basic {credentials}"))
    }
}

/// Expand a job path into URL segments. Every `/` in the stored path is a
/// folder boundary and becomes `/job/` on the wire, so `platform/nightly`
/// addresses `/job/platform/job/nightly`.
fn job_segments(path: &str) -> String {
    path.replace('/', "/job/")
}
