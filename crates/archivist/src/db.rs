//! Database connection utilities.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

#[cfg(feature = "migrate")]
use crate::migration::{Migrator, MigratorTrait};

/// SQLite pragmas applied to every fresh connection.
///
/// - `journal_mode = WAL` lets readers coexist with the sync writer
/// - `busy_timeout = 5000` waits for locks instead of failing immediately
/// - `synchronous = NORMAL` is the recommended durability level under WAL
/// - `foreign_keys = ON` makes job deletion cascade through builds, test
///   cases, and logs
const SQLITE_PRAGMAS: [&str; 4] = [
    "PRAGMA journal_mode = WAL",
    "PRAGMA busy_timeout = 5000",
    "PRAGMA synchronous = NORMAL",
    "PRAGMA foreign_keys = ON",
];

/// Open a database connection. SQLite URLs additionally get the pragmas
/// the mirror relies on.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    if database_url.starts_with("sqlite") {
        apply_sqlite_pragmas(&db).await?;
    }
    Ok(db)
}

/// Open a connection and bring the schema up to date.
#[cfg(feature = "migrate")]
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = connect(database_url).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

async fn apply_sqlite_pragmas(db: &DatabaseConnection) -> Result<(), DbErr> {
    for pragma in SQLITE_PRAGMAS {
        db.execute(Statement::from_string(db.get_database_backend(), pragma))
            .await?;
    }
    Ok(())
}
