pub mod admin;
pub mod migrate;
pub mod serve;

use anyhow::Context;

use crate::config::AppConfig;
use crate::database::{migrations, DatabaseManager};

pub(crate) fn load_config() -> anyhow::Result<AppConfig> {
    AppConfig::from_env().context("invalid configuration")
}

/// Connect and bring the schema up to date.
pub(crate) async fn connect_and_migrate(config: &AppConfig) -> anyhow::Result<DatabaseManager> {
    let db = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    migrations::run(db.pool())
        .await
        .context("database migration failed")?;
    Ok(db)
}
