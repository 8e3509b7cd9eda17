//! Jenkins REST API client.
//!
//! A thin read-only client over the Jenkins JSON API, covering the three
//! endpoints the sync engine needs: job metadata (with a `tree`
//! projection), single-build metadata, and per-build test reports.
//!
//! Module structure:
//! - `client` - [`JenkinsClient`] and URL construction
//! - `error` - [`JenkinsError`]
//! - `types` - deserialization targets for the wire payloads

mod client;
mod error;
mod types;

pub use client::{JOB_TREE, JenkinsClient};
pub use error::JenkinsError;
pub use types::{
    BuildAction, BuildCause, BuildRef, CaseReport, JenkinsBuild, JenkinsJob, TestReport, TestSuite,
};
