//! Reconciliation of a single build against the remote server.

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use sea_orm::{DatabaseConnection, Set};
use uuid::Uuid;

use crate::entity::{build, job, test_case, test_log};
use crate::jenkins::{BuildAction, JenkinsClient, TestReport};
use crate::repository;

use super::errors::SyncError;

/// Fetch one build from Jenkins and upsert it locally; when the build has
/// finished, record its test report as well.
///
/// `is_update` distinguishes the in-progress pass, where the local row
/// must already exist, from first-time discovery, where it must not. The
/// test report is read back from the persisted row rather than the remote
/// payload, so what gets recorded always matches what was stored. Returns
/// the number of test cases recorded.
pub(crate) async fn reconcile_build(
    client: &JenkinsClient,
    db: &DatabaseConnection,
    job: &job::Model,
    number: i32,
    is_update: bool,
) -> Result<usize, SyncError> {
    let remote = client.get_build(&job.jenkins_path, number).await?;

    let timestamp = localize_timestamp(remote.timestamp)?;
    let started_by = extract_started_by(&remote.actions);
    let now = Utc::now().fixed_offset();

    if is_update {
        let existing = repository::build::find_by_job_and_number(db, job.id, number)
            .await?
            .ok_or(SyncError::MissingBuildRow { number })?;
        let mut active: build::ActiveModel = existing.into();
        active.result = Set(remote.result);
        active.duration_ms = Set(remote.duration);
        active.timestamp = Set(timestamp);
        active.started_by = Set(started_by);
        active.building = Set(remote.building);
        active.synced_at = Set(now);
        repository::build::update(db, active).await?;
    } else {
        repository::build::insert(
            db,
            build::ActiveModel {
                id: Set(Uuid::new_v4()),
                job_id: Set(job.id),
                number: Set(number),
                result: Set(remote.result),
                duration_ms: Set(remote.duration),
                timestamp: Set(timestamp),
                started_by: Set(started_by),
                building: Set(remote.building),
                synced_at: Set(now),
            },
        )
        .await?;
    }

    // Re-read the persisted row so the decision below reflects what the
    // store actually holds.
    let stored = repository::build::find_by_job_and_number(db, job.id, number)
        .await?
        .ok_or(SyncError::MissingBuildRow { number })?;

    if !stored.is_final() {
        tracing::debug!(job = %job.name, number, "build still running, tests deferred");
        return Ok(0);
    }

    let report = client.get_test_report(&job.jenkins_path, stored.number).await?;
    let recorded = record_test_report(db, &stored, &report).await?;
    tracing::debug!(job = %job.name, number, tests = recorded, "test report recorded");
    Ok(recorded)
}

async fn record_test_report(
    db: &DatabaseConnection,
    build: &build::Model,
    report: &TestReport,
) -> Result<usize, SyncError> {
    let mut recorded = 0;
    for suite in &report.suites {
        for case in &suite.cases {
            let stored = repository::test_case::insert(
                db,
                test_case::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    build_id: Set(build.id),
                    class_name: Set(case.class_name.clone()),
                    name: Set(case.name.clone()),
                    status: Set(case.status.clone()),
                    duration_secs: Set(case.duration as i64),
                },
            )
            .await?;
            repository::test_log::insert(
                db,
                test_log::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    test_case_id: Set(stored.id),
                    error_stack_trace: Set(case.error_stack_trace.clone()),
                    stdout: Set(case.stdout.clone()),
                    stderr: Set(case.stderr.clone()),
                },
            )
            .await?;
            recorded += 1;
        }
    }
    Ok(recorded)
}

/// Convert a remote epoch-milliseconds start time into an aware local
/// timestamp. Sub-second precision is dropped; reporting works in whole
/// seconds.
fn localize_timestamp(epoch_millis: i64) -> Result<DateTime<FixedOffset>, SyncError> {
    Local
        .timestamp_opt(epoch_millis / 1000, 0)
        .single()
        .map(|dt| dt.fixed_offset())
        .ok_or(SyncError::InvalidTimestamp {
            millis: epoch_millis,
        })
}

/// Derive who or what triggered a build from its action causes.
///
/// Causes are scanned in order and the first match wins: a timer trigger
/// becomes `"Timer"`, any other "Started by" description is kept with the
/// "Started by user" prefix stripped. Builds with no matching cause have
/// no recorded trigger.
pub(crate) fn extract_started_by(actions: &[BuildAction]) -> Option<String> {
    for action in actions {
        for cause in &action.causes {
            let description = &cause.short_description;
            if description.contains("Started by timer") {
                return Some("Timer".to_string());
            }
            if description.contains("Started by") {
                return Some(description.replace("Started by user", "").trim().to_string());
            }
        }
    }
    None
}
