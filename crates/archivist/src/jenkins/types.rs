//! Wire types for the Jenkins JSON API.
//!
//! Only the fields the sync engine consumes are modeled; job metadata is
//! fetched with a `tree` projection so the payloads stay small.

use serde::Deserialize;

/// Job metadata from `/job/<path>/api/json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JenkinsJob {
    /// Human display name. May drift from the locally stored name.
    pub display_name: String,
    /// Build references, newest first as Jenkins returns them.
    #[serde(default)]
    pub builds: Vec<BuildRef>,
}

/// A bare build reference inside a job listing.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BuildRef {
    pub number: i32,
}

/// Build metadata from `/job/<path>/<number>/api/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct JenkinsBuild {
    /// Final verdict (`SUCCESS`, `FAILURE`, `ABORTED`, ...). Null while
    /// the build is still running.
    pub result: Option<String>,
    /// Wall-clock duration in milliseconds. Zero while running.
    pub duration: i64,
    /// Start instant as epoch milliseconds.
    pub timestamp: i64,
    /// True while the build is still executing.
    pub building: bool,
    /// Action entries. Trigger causes are nested in here; most action
    /// types carry none.
    #[serde(default)]
    pub actions: Vec<BuildAction>,
}

/// One entry of a build's `actions` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildAction {
    #[serde(default)]
    pub causes: Vec<BuildCause>,
}

/// A single trigger cause.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildCause {
    /// Human-readable description, e.g. `"Started by user alice"` or
    /// `"Started by timer"`.
    pub short_description: String,
}

/// Test report from `/job/<path>/<number>/testReport/api/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct TestReport {
    #[serde(default)]
    pub suites: Vec<TestSuite>,
}

/// A suite grouping inside a test report.
#[derive(Debug, Clone, Deserialize)]
pub struct TestSuite {
    #[serde(default)]
    pub cases: Vec<CaseReport>,
}

/// A single test case result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseReport {
    /// Execution time in seconds, possibly fractional.
    pub duration: f64,
    pub class_name: String,
    pub name: String,
    /// Outcome label (`PASSED`, `FAILED`, `SKIPPED`, ...).
    pub status: String,
    pub error_stack_trace: Option<String>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_decodes_without_actions() {
        let payload = r#"{
            "result": "SUCCESS",
            "duration": 95000,
            "timestamp": 1700000000000,
            "building": false
        }"#;
        let build: JenkinsBuild = serde_json::from_str(payload).unwrap();
        assert_eq!(build.result.as_deref(), Some("SUCCESS"));
        assert!(build.actions.is_empty());
    }

    #[test]
    fn actions_without_causes_decode_to_empty_lists() {
        let payload = r#"{
            "result": null,
            "duration": 0,
            "timestamp": 1700000000000,
            "building": true,
            "actions": [{}, {"causes": [{"shortDescription": "Started by timer"}]}]
        }"#;
        let build: JenkinsBuild = serde_json::from_str(payload).unwrap();
        assert!(build.building);
        assert!(build.actions[0].causes.is_empty());
        assert_eq!(
            build.actions[1].causes[0].short_description,
            "Started by timer"
        );
    }

    #[test]
    fn cause_without_description_fails_to_decode() {
        let payload = r#"{
            "result": "SUCCESS",
            "duration": 1,
            "timestamp": 1700000000000,
            "building": false,
            "actions": [{"causes": [{"upstreamProject": "other"}]}]
        }"#;
        assert!(serde_json::from_str::<JenkinsBuild>(payload).is_err());
    }

    #[test]
    fn case_report_tolerates_missing_output_streams() {
        let payload = r#"{
            "suites": [{
                "cases": [{
                    "duration": 0.25,
                    "className": "com.example.SmokeTest",
                    "name": "boots",
                    "status": "PASSED"
                }]
            }]
        }"#;
        let report: TestReport = serde_json::from_str(payload).unwrap();
        let case = &report.suites[0].cases[0];
        assert_eq!(case.class_name, "com.example.SmokeTest");
        assert!(case.stdout.is_none());
        assert!(case.error_stack_trace.is_none());
    }
}
