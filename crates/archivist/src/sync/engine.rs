//! The sync pass: the orchestrating loop and per-job synchronization.

use std::time::Instant;

use sea_orm::DatabaseConnection;

use crate::entity::job;
use crate::jenkins::{JOB_TREE, JenkinsClient};
use crate::repository;

use super::errors::SyncError;
use super::reconcile::reconcile_build;
use super::types::{SyncOptions, SyncReport};

/// Run one full sync pass against the configured Jenkins server.
///
/// Loads the configuration singleton, builds one client for the whole
/// pass, and delegates to [`run_with_client`]. A missing or duplicated
/// configuration aborts before any remote call is made.
pub async fn run(db: &DatabaseConnection, options: &SyncOptions) -> Result<SyncReport, SyncError> {
    let started = Instant::now();

    let config = repository::configuration::find_singleton(db).await?;
    tracing::info!(server = %config.jenkins_url, "starting sync pass");

    let client = JenkinsClient::new(
        config.base_url(),
        config.username.clone(),
        config.api_token.clone(),
    )?;

    let mut report = run_with_client(&client, db, options).await?;
    report.elapsed = started.elapsed();
    Ok(report)
}

/// Synchronize every tracked job with an already constructed client.
///
/// Jobs are processed sequentially; one job's failure never stops its
/// siblings. Everything recoverable lands in the report's error list, in
/// encounter order. Only the initial job listing can fail the pass.
pub async fn run_with_client(
    client: &JenkinsClient,
    db: &DatabaseConnection,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError> {
    let started = Instant::now();
    let mut report = SyncReport::default();

    let jobs = repository::job::find_all(db).await?;
    tracing::info!(jobs = jobs.len(), "processing tracked jobs");

    for job in jobs {
        sync_job(client, db, job, options, &mut report).await;
        report.jobs_processed += 1;
    }

    if !report.is_clean() {
        tracing::warn!(errors = report.errors.len(), "sync pass finished with errors");
    }
    report.elapsed = started.elapsed();
    Ok(report)
}

/// Synchronize a single job: refresh its display name, re-reconcile any
/// builds still marked in progress, then discover new builds inside the
/// history window.
pub async fn sync_job(
    client: &JenkinsClient,
    db: &DatabaseConnection,
    job: job::Model,
    options: &SyncOptions,
    report: &mut SyncReport,
) {
    tracing::info!(job = %job.name, path = %job.jenkins_path, "processing job");
    let mut job = job;

    // Remote metadata drives name refresh and discovery. When the fetch
    // fails there is no remote list to draw from, so discovery is skipped
    // for this pass; the in-progress sweep below still runs.
    let remote_numbers: Vec<i32> = match client.get_job(&job.jenkins_path, JOB_TREE).await {
        Ok(remote) => {
            if remote.display_name != job.name {
                match repository::job::update_name(db, job.clone(), &remote.display_name).await {
                    Ok(updated) => {
                        tracing::info!(job = %updated.name, "refreshed job display name");
                        job = updated;
                    }
                    Err(e) => {
                        let err = SyncError::from(e);
                        report.errors.push(job_error(&job, &err));
                    }
                }
            }
            remote.builds.iter().map(|b| b.number).collect()
        }
        Err(e) => {
            let err = SyncError::from(e);
            report.errors.push(job_error(&job, &err));
            Vec::new()
        }
    };

    // Builds recorded as running last time must be re-checked every pass,
    // however old they are.
    match repository::build::find_building(db, job.id).await {
        Ok(in_progress) => {
            if !in_progress.is_empty() {
                tracing::info!(
                    job = %job.name,
                    count = in_progress.len(),
                    "re-checking in-progress builds"
                );
            }
            for build in in_progress {
                match reconcile_build(client, db, &job, build.number, true).await {
                    Ok(tests) => {
                        report.builds_updated += 1;
                        report.tests_recorded += tests;
                    }
                    Err(e) => report.errors.push(build_error(&job, build.number, &e)),
                }
            }
        }
        Err(e) => {
            let err = SyncError::from(e);
            report.errors.push(job_error(&job, &err));
        }
    }

    // First-time discovery, capped to the newest part of the remote list.
    for number in remote_numbers.into_iter().take(options.history_limit) {
        match repository::build::exists(db, job.id, number).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(job = %job.name, number, "discovered new build");
                match reconcile_build(client, db, &job, number, false).await {
                    Ok(tests) => {
                        report.builds_created += 1;
                        report.tests_recorded += tests;
                    }
                    Err(e) => report.errors.push(build_error(&job, number, &e)),
                }
            }
            Err(e) => {
                let err = SyncError::from(e);
                report.errors.push(build_error(&job, number, &err));
            }
        }
    }
}

fn job_error(job: &job::Model, err: &SyncError) -> String {
    format!(
        "Error processing job [{}]: {} - {}",
        job.name,
        err.kind(),
        err
    )
}

fn build_error(job: &job::Model, number: i32, err: &SyncError) -> String {
    format!(
        "Error processing build number {} for job [{}]: {} - {}",
        number,
        job.name,
        err.kind(),
        err
    )
}

#[cfg(all(test, feature = "sqlite", feature = "migrate"))]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use sea_orm::Set;
    use serde_json::json;
    use uuid::Uuid;

    use crate::connect_and_migrate;
    use crate::entity::build;
    use crate::http::{HttpResponse, MockTransport};
    use crate::jenkins::JenkinsClient;

    use super::*;

    const BASE: &str = "http://jenkins.test";

    async fn test_db() -> DatabaseConnection {
        connect_and_migrate("sqlite::memory:")
            .await
            .expect("in-memory database should migrate")
    }

    fn mock_client() -> (JenkinsClient, MockTransport) {
        let mock = MockTransport::new();
        let client = JenkinsClient::with_transport(Arc::new(mock.clone()), BASE, None, None);
        (client, mock)
    }

    async fn seed_job(db: &DatabaseConnection, path: &str, name: &str) -> job::Model {
        repository::job::insert(db, path, name)
            .await
            .expect("job should insert")
    }

    async fn seed_build(
        db: &DatabaseConnection,
        job: &job::Model,
        number: i32,
        building: bool,
    ) -> build::Model {
        repository::build::insert(
            db,
            build::ActiveModel {
                id: Set(Uuid::new_v4()),
                job_id: Set(job.id),
                number: Set(number),
                result: Set(if building {
                    None
                } else {
                    Some("SUCCESS".to_string())
                }),
                duration_ms: Set(0),
                timestamp: Set(Utc::now().fixed_offset()),
                started_by: Set(None),
                building: Set(building),
                synced_at: Set(Utc::now().fixed_offset()),
            },
        )
        .await
        .expect("build should insert")
    }

    fn ok_json(value: serde_json::Value) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: serde_json::to_vec(&value).expect("payload should serialize"),
        }
    }

    fn error_response(status: u16) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: b"{}".to_vec(),
        }
    }

    fn job_url(path: &str) -> String {
        format!(
            "{BASE}/job/{}/api/json?tree=displayName,builds[number]",
            path.replace('/', "/job/")
        )
    }

    fn build_url(path: &str, number: i32) -> String {
        format!("{BASE}/job/{}/{number}/api/json", path.replace('/', "/job/"))
    }

    fn report_url(path: &str, number: i32) -> String {
        format!(
            "{BASE}/job/{}/{number}/testReport/api/json",
            path.replace('/', "/job/")
        )
    }

    fn job_payload(name: &str, numbers: &[i32]) -> serde_json::Value {
        json!({
            "displayName": name,
            "builds": numbers.iter().map(|n| json!({"number": n})).collect::<Vec<_>>(),
        })
    }

    fn finished_build_payload(result: &str, started_by: &str) -> serde_json::Value {
        json!({
            "result": result,
            "duration": 90_000,
            "timestamp": 1_700_000_000_000_i64,
            "building": false,
            "actions": [{"causes": [{"shortDescription": started_by}]}],
        })
    }

    fn running_build_payload() -> serde_json::Value {
        json!({
            "result": null,
            "duration": 0,
            "timestamp": 1_700_000_000_000_i64,
            "building": true,
            "actions": [{"causes": [{"shortDescription": "Started by timer"}]}],
        })
    }

    fn report_payload(cases: &[(&str, &str)]) -> serde_json::Value {
        json!({
            "suites": [{
                "cases": cases.iter().map(|(name, status)| json!({
                    "duration": 1.5,
                    "className": "com.example.SmokeTest",
                    "name": name,
                    "status": status,
                    "errorStackTrace": if *status == "FAILED" { Some("trace") } else { None },
                    "stdout": "captured out",
                    "stderr": null,
                })).collect::<Vec<_>>(),
            }],
        })
    }

    #[tokio::test]
    async fn discovers_new_builds_and_records_their_tests() {
        let db = test_db().await;
        let job = seed_job(&db, "demo", "demo").await;
        let (client, mock) = mock_client();

        mock.push_response(&job_url("demo"), ok_json(job_payload("demo", &[2, 1])));
        mock.push_response(
            &build_url("demo", 2),
            ok_json(finished_build_payload("SUCCESS", "Started by user alice")),
        );
        mock.push_response(
            &report_url("demo", 2),
            ok_json(report_payload(&[("boots", "PASSED"), ("fails @ smoke", "FAILED")])),
        );
        mock.push_response(
            &build_url("demo", 1),
            ok_json(finished_build_payload("FAILURE", "Started by timer")),
        );
        mock.push_response(&report_url("demo", 1), ok_json(report_payload(&[("boots", "PASSED")])));

        let report = run_with_client(&client, &db, &SyncOptions::default())
            .await
            .unwrap();

        assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);
        assert_eq!(report.jobs_processed, 1);
        assert_eq!(report.builds_created, 2);
        assert_eq!(report.builds_updated, 0);
        assert_eq!(report.tests_recorded, 3);

        let newest = repository::build::find_by_job_and_number(&db, job.id, 2)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(newest.result.as_deref(), Some("SUCCESS"));
        assert_eq!(newest.started_by.as_deref(), Some("alice"));
        assert!(!newest.building);
        assert_eq!(newest.duration_ms, 90_000);
        assert_eq!(newest.timestamp.timestamp(), 1_700_000_000);

        let oldest = repository::build::find_by_job_and_number(&db, job.id, 1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(oldest.started_by.as_deref(), Some("Timer"));

        assert_eq!(
            repository::test_case::count_by_build(&db, newest.id).await.unwrap(),
            2
        );
        let cases = repository::test_case::find_by_build(&db, newest.id).await.unwrap();
        let failed = cases.iter().find(|c| c.status == "FAILED").unwrap();
        let log = repository::test_log::find_by_test_case(&db, failed.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(log.error_stack_trace.as_deref(), Some("trace"));
        assert_eq!(log.stdout.as_deref(), Some("captured out"));
        assert!(log.stderr.is_none());
    }

    #[tokio::test]
    async fn discovery_stops_at_the_history_window() {
        let db = test_db().await;
        seed_job(&db, "busy", "busy").await;
        let (client, mock) = mock_client();

        let numbers: Vec<i32> = (1..=25).rev().collect();
        mock.push_response(&job_url("busy"), ok_json(job_payload("busy", &numbers)));
        for n in 16..=25 {
            mock.push_response(
                &build_url("busy", n),
                ok_json(finished_build_payload("SUCCESS", "Started by user alice")),
            );
            mock.push_response(&report_url("busy", n), ok_json(json!({"suites": []})));
        }

        let report = run_with_client(&client, &db, &SyncOptions::default())
            .await
            .unwrap();

        assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);
        assert_eq!(report.builds_created, 10);
        // 1 job fetch + 10 build fetches + 10 report fetches, nothing
        // beyond the window.
        assert_eq!(mock.requests().len(), 21);
    }

    #[tokio::test]
    async fn in_progress_builds_are_updated_even_outside_the_window() {
        let db = test_db().await;
        let job = seed_job(&db, "demo", "demo").await;
        // Number 3 is far below the newest builds the remote lists.
        seed_build(&db, &job, 3, true).await;
        let (client, mock) = mock_client();

        let numbers: Vec<i32> = (90..=100).rev().collect();
        mock.push_response(&job_url("demo"), ok_json(job_payload("demo", &numbers)));
        mock.push_response(
            &build_url("demo", 3),
            ok_json(finished_build_payload("UNSTABLE", "Started by user bob")),
        );
        mock.push_response(
            &report_url("demo", 3),
            ok_json(report_payload(&[("boots", "PASSED"), ("lints", "PASSED")])),
        );
        for n in 91..=100 {
            mock.push_response(
                &build_url("demo", n),
                ok_json(finished_build_payload("SUCCESS", "Started by user alice")),
            );
            mock.push_response(&report_url("demo", n), ok_json(json!({"suites": []})));
        }

        let report = run_with_client(&client, &db, &SyncOptions::default())
            .await
            .unwrap();

        assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);
        assert_eq!(report.builds_updated, 1);
        assert_eq!(report.builds_created, 10);
        assert_eq!(report.tests_recorded, 2);

        let finished = repository::build::find_by_job_and_number(&db, job.id, 3)
            .await
            .unwrap()
            .unwrap();
        assert!(!finished.building);
        assert_eq!(finished.result.as_deref(), Some("UNSTABLE"));
        assert_eq!(finished.started_by.as_deref(), Some("bob"));
    }

    #[tokio::test]
    async fn still_running_builds_stay_open_and_record_no_tests() {
        let db = test_db().await;
        let job = seed_job(&db, "demo", "demo").await;
        seed_build(&db, &job, 5, true).await;
        let (client, mock) = mock_client();

        mock.push_response(&job_url("demo"), ok_json(job_payload("demo", &[5])));
        mock.push_response(&build_url("demo", 5), ok_json(running_build_payload()));

        let report = run_with_client(&client, &db, &SyncOptions::default())
            .await
            .unwrap();

        assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);
        assert_eq!(report.builds_updated, 1);
        assert_eq!(report.tests_recorded, 0);

        let row = repository::build::find_by_job_and_number(&db, job.id, 5)
            .await
            .unwrap()
            .unwrap();
        assert!(row.building);
        assert_eq!(row.started_by.as_deref(), Some("Timer"));
        // No test report request was made for a running build.
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn finished_builds_are_never_revisited() {
        let db = test_db().await;
        let job = seed_job(&db, "demo", "demo").await;
        seed_build(&db, &job, 8, false).await;
        let (client, mock) = mock_client();

        mock.push_response(&job_url("demo"), ok_json(job_payload("demo", &[8])));

        let report = run_with_client(&client, &db, &SyncOptions::default())
            .await
            .unwrap();

        assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);
        assert_eq!(report.builds_created, 0);
        assert_eq!(report.builds_updated, 0);
        // Only the job listing went out; the stored build was left alone.
        assert_eq!(mock.requests().len(), 1);

        let row = repository::build::find_by_job_and_number(&db, job.id, 8)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.result.as_deref(), Some("SUCCESS"));
    }

    #[tokio::test]
    async fn one_failing_build_does_not_stop_siblings_or_other_jobs() {
        let db = test_db().await;
        seed_job(&db, "alpha", "alpha").await;
        seed_job(&db, "beta", "beta").await;
        let (client, mock) = mock_client();

        mock.push_response(&job_url("alpha"), ok_json(job_payload("alpha", &[6, 5])));
        mock.push_response(
            &build_url("alpha", 6),
            ok_json(finished_build_payload("SUCCESS", "Started by user alice")),
        );
        mock.push_response(&report_url("alpha", 6), ok_json(json!({"suites": []})));
        mock.push_response(&build_url("alpha", 5), error_response(500));

        mock.push_response(&job_url("beta"), ok_json(job_payload("beta", &[1])));
        mock.push_response(
            &build_url("beta", 1),
            ok_json(finished_build_payload("SUCCESS", "Started by user bob")),
        );
        mock.push_response(&report_url("beta", 1), ok_json(json!({"suites": []})));

        let report = run_with_client(&client, &db, &SyncOptions::default())
            .await
            .unwrap();

        assert_eq!(report.jobs_processed, 2);
        assert_eq!(report.builds_created, 2);
        assert_eq!(report.errors.len(), 1);
        assert!(
            report.errors[0]
                .starts_with("Error processing build number 5 for job [alpha]: Status - "),
            "unexpected error string: {}",
            report.errors[0]
        );
    }

    #[tokio::test]
    async fn job_metadata_failure_skips_discovery_but_not_the_progress_sweep() {
        let db = test_db().await;
        let job = seed_job(&db, "demo", "demo").await;
        seed_build(&db, &job, 3, true).await;
        let (client, mock) = mock_client();

        mock.push_response(&job_url("demo"), error_response(502));
        mock.push_response(
            &build_url("demo", 3),
            ok_json(finished_build_payload("SUCCESS", "Started by user alice")),
        );
        mock.push_response(
            &report_url("demo", 3),
            ok_json(report_payload(&[("boots", "PASSED")])),
        );

        let report = run_with_client(&client, &db, &SyncOptions::default())
            .await
            .unwrap();

        assert_eq!(report.jobs_processed, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Error processing job [demo]: Status - "));
        assert_eq!(report.builds_updated, 1);
        assert_eq!(report.builds_created, 0);
        assert_eq!(report.tests_recorded, 1);
    }

    #[tokio::test]
    async fn drifted_display_names_are_refreshed() {
        let db = test_db().await;
        let job = seed_job(&db, "platform/nightly", "old name").await;
        let (client, mock) = mock_client();

        mock.push_response(
            &job_url("platform/nightly"),
            ok_json(job_payload("Nightly", &[])),
        );

        let report = run_with_client(&client, &db, &SyncOptions::default())
            .await
            .unwrap();

        assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);
        let refreshed = repository::job::find_by_path(&db, "platform/nightly")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(refreshed.id, job.id);
        assert_eq!(refreshed.name, "Nightly");
    }

    #[tokio::test]
    async fn missing_test_report_keeps_the_build_row() {
        let db = test_db().await;
        let job = seed_job(&db, "demo", "demo").await;
        let (client, mock) = mock_client();

        mock.push_response(&job_url("demo"), ok_json(job_payload("demo", &[9])));
        mock.push_response(
            &build_url("demo", 9),
            ok_json(finished_build_payload("SUCCESS", "Started by user alice")),
        );
        mock.push_response(&report_url("demo", 9), error_response(404));

        let report = run_with_client(&client, &db, &SyncOptions::default())
            .await
            .unwrap();

        assert_eq!(report.errors.len(), 1);
        assert!(
            report.errors[0]
                .starts_with("Error processing build number 9 for job [demo]: Status - ")
        );

        // The metadata write preceded the report fetch, so the row is
        // there even though the reconcile counted as failed.
        let row = repository::build::find_by_job_and_number(&db, job.id, 9)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.result.as_deref(), Some("SUCCESS"));
        assert_eq!(
            repository::test_case::count_by_build(&db, row.id).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn a_shorter_window_limits_discovery() {
        let db = test_db().await;
        seed_job(&db, "demo", "demo").await;
        let (client, mock) = mock_client();

        mock.push_response(&job_url("demo"), ok_json(job_payload("demo", &[4, 3, 2, 1])));
        mock.push_response(
            &build_url("demo", 4),
            ok_json(finished_build_payload("SUCCESS", "Started by user alice")),
        );
        mock.push_response(&report_url("demo", 4), ok_json(json!({"suites": []})));

        let options = SyncOptions { history_limit: 1 };
        let report = run_with_client(&client, &db, &options).await.unwrap();

        assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);
        assert_eq!(report.builds_created, 1);
    }
}
