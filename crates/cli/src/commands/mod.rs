//! CLI command implementations.

pub mod migrate;
pub mod remind;
pub mod seed;

use sqlx::SqlitePool;

use brightdesk_server::config::CrmConfig;
use brightdesk_server::db;

/// Load configuration and open the database pool shared by all commands.
pub(crate) async fn connect() -> Result<(CrmConfig, SqlitePool), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = CrmConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    Ok((config, pool))
}
