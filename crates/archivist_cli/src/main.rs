//! Command-line interface for the archivist Jenkins mirror.

mod commands;
mod config;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use console::Term;
use tracing_subscriber::EnvFilter;

use crate::commands::job::JobAction;
use crate::commands::migrate::MigrateAction;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "archivist")]
#[command(version)]
#[command(about = "Mirror Jenkins job, build, and test history into a local database")]
#[command(
    long_about = "Archivist keeps a local, append-only mirror of a Jenkins server: \
for every tracked job it records newly appeared builds, follows builds that are \
still running until they finish, and stores each finished build's test report."
)]
#[command(after_long_help = r#"EXAMPLES
    Point archivist at a Jenkins server:
        $ archivist configure --url https://ci.example.com --username bot --token t0k3n

    Create the database schema:
        $ archivist migrate up

    Track a job and run a sync pass:
        $ archivist job add platform/nightly
        $ archivist sync

    Use a shorter discovery window for a quick pass:
        $ archivist sync --history-limit 3

    Generate shell completions:
        $ archivist completions zsh > ~/.zfunc/_archivist

CONFIGURATION
    Settings are read from, in order:
      1. $XDG_CONFIG_HOME/archivist/config.toml
      2. ./archivist.toml
      3. ARCHIVIST_* environment variables
      4. A .env file in the current directory

ENVIRONMENT VARIABLES
    ARCHIVIST_DATABASE_URL    Database connection string
                              (default: sqlite file in the XDG state directory)
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one sync pass against the configured Jenkins server
    Sync {
        /// How many of the newest remote builds to consider for
        /// first-time discovery, per job
        #[arg(short = 'l', long)]
        history_limit: Option<usize>,
    },
    /// Store or update the Jenkins connection settings
    Configure {
        /// Jenkins base URL, e.g. https://ci.example.com
        #[arg(long)]
        url: String,
        /// Account to authenticate as
        #[arg(long)]
        username: Option<String>,
        /// API token paired with --username
        #[arg(long, env = "ARCHIVIST_API_TOKEN")]
        token: Option<String>,
    },
    /// Manage the set of tracked jobs
    Job {
        #[command(subcommand)]
        action: JobAction,
    },
    /// Manage the database schema
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Generate a man page
    Man {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Interactive runs get the styled summaries; piped runs get logs.
    if !Term::stdout().is_term() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("archivist=info,archivist_cli=info")
            }))
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            commands::meta::handle_completions(shell);
            Ok(())
        }
        Commands::Man { output } => commands::meta::handle_man(output),
        Commands::Sync { history_limit } => {
            let (config, database_url) = prepare_environment()?;
            commands::sync::handle_sync(history_limit, &config, &database_url).await
        }
        Commands::Configure {
            url,
            username,
            token,
        } => {
            let (_, database_url) = prepare_environment()?;
            commands::configure::handle_configure(url, username, token, &database_url).await
        }
        Commands::Job { action } => {
            let (_, database_url) = prepare_environment()?;
            commands::job::handle_job(action, &database_url).await
        }
        Commands::Migrate { action } => {
            let (_, database_url) = prepare_environment()?;
            commands::migrate::handle_migrate(action, &database_url).await
        }
    }
}

/// Load layered configuration and resolve the database URL, creating the
/// directory for a SQLite file when needed.
fn prepare_environment() -> Result<(Config, String), Box<dyn Error>> {
    let config = Config::load();
    let Some(database_url) = config.database_url() else {
        return Err(
            "could not determine a database location; set [database].url or ARCHIVIST_DATABASE_URL"
                .into(),
        );
    };
    prepare_sqlite_path(&database_url)?;
    Ok((config, database_url))
}

fn prepare_sqlite_path(database_url: &str) -> Result<(), Box<dyn Error>> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = Path::new(rest.split('?').next().unwrap_or(rest));
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    if path.is_relative() {
        tracing::warn!(path = %path.display(), "database path is relative to the working directory");
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
