//! The `migrate` subcommand group: manage the database schema.

use std::error::Error;

use clap::Subcommand;
use console::style;

use archivist::db;
use archivist::migration::{Migrator, MigratorTrait};

#[derive(Subcommand)]
pub(crate) enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Roll back the most recent migration
    Down,
    /// Show which migrations have been applied
    Status,
    /// Drop everything and re-apply all migrations
    Fresh {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub(crate) async fn handle_migrate(
    action: MigrateAction,
    database_url: &str,
) -> Result<(), Box<dyn Error>> {
    let db = db::connect(database_url).await?;

    match action {
        MigrateAction::Up => {
            Migrator::up(&db, None).await?;
            println!("{} Schema is up to date.", style("✓").green().bold());
        }
        MigrateAction::Down => {
            Migrator::down(&db, Some(1)).await?;
            println!(
                "{} Rolled back the most recent migration.",
                style("✓").green().bold()
            );
        }
        MigrateAction::Status => {
            let applied = Migrator::get_applied_migrations(&db).await?;
            let pending = Migrator::get_pending_migrations(&db).await?;

            if applied.is_empty() && pending.is_empty() {
                println!("No migrations are defined.");
                return Ok(());
            }
            for migration in &applied {
                println!("{} {}", style("applied").green(), migration.name());
            }
            for migration in &pending {
                println!("{} {}", style("pending").yellow(), migration.name());
            }
        }
        MigrateAction::Fresh { yes } => {
            if !yes {
                eprintln!(
                    "{} This drops every mirrored build and test record.",
                    style("warning:").yellow().bold()
                );
                return Err("re-run with --yes to confirm".into());
            }
            Migrator::fresh(&db).await?;
            println!(
                "{} Dropped and re-created the schema.",
                style("✓").green().bold()
            );
        }
    }

    Ok(())
}
