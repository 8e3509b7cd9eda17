//! The `sync` subcommand: run one pass against the configured server.

use std::error::Error;

use archivist::db;
use archivist::sync::{self, SyncOptions, SyncReport};
use console::{Term, style};

use crate::config::Config;

pub(crate) async fn handle_sync(
    history_limit: Option<usize>,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn Error>> {
    let db = db::connect(database_url).await?;

    let options = SyncOptions {
        history_limit: history_limit.unwrap_or(config.sync.history_limit),
    };

    let report = sync::run(&db, &options).await?;

    if Term::stdout().is_term() {
        print_report(&report);
    } else {
        log_report(&report);
    }

    Ok(())
}

fn print_report(report: &SyncReport) {
    println!(
        "Processed {} job(s): {} build(s) discovered, {} updated, {} test case(s) recorded.",
        report.jobs_processed, report.builds_created, report.builds_updated, report.tests_recorded
    );

    if !report.is_clean() {
        println!();
        println!(
            "{}",
            style(format!("{} error(s) during the pass:", report.errors.len()))
                .yellow()
                .bold()
        );
        for error in &report.errors {
            println!("  {} {}", style("-").yellow(), error);
        }
        println!();
    }

    println!(
        "{}",
        style(format!(
            "Sync done in {:.2} seconds.",
            report.elapsed.as_secs_f64()
        ))
        .green()
    );
}

fn log_report(report: &SyncReport) {
    tracing::info!(
        jobs = report.jobs_processed,
        created = report.builds_created,
        updated = report.builds_updated,
        tests = report.tests_recorded,
        errors = report.errors.len(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "sync pass finished"
    );
    for error in &report.errors {
        tracing::error!("{error}");
    }
}
