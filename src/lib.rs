//! Draft Variable API
//!
//! Console HTTP surface for inspecting and editing the variables a draft
//! workflow produced while being debugged:
//! - Paginated overview and per-node listings
//! - Editing, deleting and resetting individual variables
//! - Conversation, system and environment variable views

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::auth::{JwtConfig, JwtGenerator, JwtService};
use infrastructure::storage::{Repositories, SeedData, StorageType};
use tracing::{info, warn};

/// Build repositories for the configured backend, applying the seed fixture
/// to the in-memory backend
pub async fn create_repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    let repositories = match config.storage.storage_type()? {
        StorageType::InMemory => {
            info!("Using in-memory storage");
            let repositories = Repositories::in_memory();

            if let Some(path) = &config.seed.path {
                SeedData::load(path)?.apply(&repositories).await?;
            }

            repositories
        }
        StorageType::Postgres => {
            info!("Using PostgreSQL storage");

            if config.seed.path.is_some() {
                warn!("Seed fixture ignored for the postgres backend");
            }

            Repositories::connect_postgres(&config.storage.postgres()?).await?
        }
    };

    Ok(repositories)
}

/// JWT service for console bearer tokens
pub fn create_jwt_service(config: &AppConfig) -> Arc<dyn JwtGenerator> {
    Arc::new(JwtService::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.expiration_hours,
    )))
}

/// Create application state from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let repositories = create_repositories(config).await?;
    Ok(AppState::from_repositories(
        repositories,
        create_jwt_service(config),
    ))
}
