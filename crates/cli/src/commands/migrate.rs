//! Database migration command.

use tracing::info;

use brightdesk_server::db;

/// Apply pending migrations to the configured database.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the database is
/// unreachable, or a migration fails to apply.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, pool) = super::connect().await?;

    info!("Running migrations...");
    db::run_migrations(&pool).await?;
    info!("Migrations complete");
    Ok(())
}
