//! Migrate command - applies pending migrations to the configured database

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::storage::{run_migrations, PostgresConfig, PostgresMigrator};

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let database_url = config
        .storage
        .database_url
        .clone()
        .ok_or_else(|| anyhow::anyhow!("storage.database_url (or DATABASE_URL) is not set"))?;

    let pool = PostgresConfig::new(database_url)
        .with_max_connections(1)
        .with_min_connections(1)
        .connect()
        .await?;

    run_migrations(&pool).await?;

    let version = PostgresMigrator::new(pool).current_version().await?;
    info!(version = ?version, "Database schema is up to date");

    Ok(())
}
