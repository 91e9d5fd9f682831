//! Migrate command - applies the PostgreSQL schema

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::storage::{connect_pool, Migrator, PostgresMigrator};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the latest applied migration instead of applying pending ones
    #[arg(long)]
    pub revert: bool,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let postgres = config
        .storage
        .postgres()
        .context("migrate needs storage.database_url")?;
    let migrator = PostgresMigrator::new(connect_pool(&postgres).await?);

    if args.revert {
        migrator.revert().await?;
    } else {
        migrator.run().await?;
    }

    info!(version = ?migrator.version().await?, "Migrations complete");

    Ok(())
}
