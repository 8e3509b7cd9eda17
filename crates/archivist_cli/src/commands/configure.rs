//! The `configure` subcommand: store the Jenkins connection settings.

use std::error::Error;

use archivist::db;
use archivist::repository;
use console::style;

pub(crate) async fn handle_configure(
    url: String,
    username: Option<String>,
    token: Option<String>,
    database_url: &str,
) -> Result<(), Box<dyn Error>> {
    let db = db::connect(database_url).await?;

    let existed = repository::configuration::count(&db).await? > 0;
    let saved = repository::configuration::upsert(
        &db,
        &url,
        username.as_deref(),
        token.as_deref(),
    )
    .await?;

    if existed {
        println!(
            "{} Updated the existing configuration.",
            style("✓").green().bold()
        );
    } else {
        println!("{} Created a new configuration.", style("✓").green().bold());
    }
    println!(
        "  Jenkins server: {}",
        style(&saved.jenkins_url).cyan()
    );
    match &saved.username {
        Some(user) => println!("  Authenticating as {} with an API token.", style(user).cyan()),
        None => println!("  Using anonymous access."),
    }

    Ok(())
}
