//! The `job` subcommand group: manage the set of tracked jobs.

use std::error::Error;
use std::io::{self, Write};

use clap::{Subcommand, ValueEnum};
use console::style;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use archivist::db;
use archivist::repository;

#[derive(Subcommand)]
pub(crate) enum JobAction {
    /// Start tracking a job
    Add {
        /// Job path on the server, folders separated by `/`
        /// (e.g. `platform/nightly`)
        path: String,
        /// Display name to use until the first sync refreshes it
        #[arg(long)]
        name: Option<String>,
    },
    /// List tracked jobs
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Stop tracking a job and drop its mirrored history
    Remove {
        /// Job path on the server
        path: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
struct JobRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Builds")]
    builds: u64,
}

pub(crate) async fn handle_job(action: JobAction, database_url: &str) -> Result<(), Box<dyn Error>> {
    let db = db::connect(database_url).await?;

    match action {
        JobAction::Add { path, name } => {
            if repository::job::find_by_path(&db, &path).await?.is_some() {
                return Err(format!("job '{path}' is already tracked").into());
            }
            let name = name.unwrap_or_else(|| path.clone());
            let job = repository::job::insert(&db, &path, &name).await?;
            println!(
                "{} Tracking {} ({}). The next sync pass will pull its history.",
                style("✓").green().bold(),
                style(&job.name).cyan(),
                job.jenkins_path
            );
        }
        JobAction::List { output } => {
            let jobs = repository::job::find_all(&db).await?;
            let mut rows = Vec::with_capacity(jobs.len());
            for job in jobs {
                let builds = repository::build::count_by_job(&db, job.id).await?;
                rows.push(JobRow {
                    name: job.name,
                    path: job.jenkins_path,
                    builds,
                });
            }

            match output {
                OutputFormat::Table => {
                    if rows.is_empty() {
                        println!("No jobs are tracked yet.");
                        println!(
                            "Add one with: {}",
                            style("archivist job add <path>").cyan()
                        );
                    } else {
                        println!("{}", Table::new(&rows).with(Style::rounded()));
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                }
            }
        }
        JobAction::Remove { path, yes } => {
            let Some(job) = repository::job::find_by_path(&db, &path).await? else {
                return Err(format!("job '{path}' is not tracked").into());
            };
            let builds = repository::build::count_by_job(&db, job.id).await?;

            if !yes {
                let prompt = format!(
                    "Remove '{}' and its {} mirrored build(s)?",
                    job.name, builds
                );
                if !confirm(&prompt)? {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            repository::job::delete(&db, job.id).await?;
            println!(
                "{} Removed {} and {} build(s) of mirrored history.",
                style("✓").green().bold(),
                style(&job.name).cyan(),
                builds
            );
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
