//! Repository wiring for the configured storage backend

use std::sync::Arc;

use sqlx::postgres::PgPool;

use crate::domain::account::{AccountRepository, SetupRepository};
use crate::domain::app::AppRepository;
use crate::domain::draft_variable::DraftVariableRepository;
use crate::domain::workflow::WorkflowRepository;
use crate::domain::DomainError;
use crate::infrastructure::account::{
    InMemoryAccountRepository, InMemorySetupRepository, PostgresAccountRepository,
    PostgresSetupRepository,
};
use crate::infrastructure::app::{InMemoryAppRepository, PostgresAppRepository};
use crate::infrastructure::draft_variable::{
    InMemoryDraftVariableRepository, PostgresDraftVariableRepository,
};
use crate::infrastructure::workflow::{InMemoryWorkflowRepository, PostgresWorkflowRepository};

use super::migrations::run_storage_migrations;
use super::postgres::{connect_pool, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Every repository the service needs, behind trait objects
#[derive(Clone)]
pub struct Repositories {
    pub draft_variables: Arc<dyn DraftVariableRepository>,
    pub workflows: Arc<dyn WorkflowRepository>,
    pub apps: Arc<dyn AppRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub setup: Arc<dyn SetupRepository>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

impl Repositories {
    /// Empty in-memory repositories; setup starts incomplete
    pub fn in_memory() -> Self {
        Self {
            draft_variables: Arc::new(InMemoryDraftVariableRepository::new()),
            workflows: Arc::new(InMemoryWorkflowRepository::new()),
            apps: Arc::new(InMemoryAppRepository::new()),
            accounts: Arc::new(InMemoryAccountRepository::new()),
            setup: Arc::new(InMemorySetupRepository::new(false)),
        }
    }

    /// Repositories sharing one PostgreSQL pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            draft_variables: Arc::new(PostgresDraftVariableRepository::new(pool.clone())),
            workflows: Arc::new(PostgresWorkflowRepository::new(pool.clone())),
            apps: Arc::new(PostgresAppRepository::new(pool.clone())),
            accounts: Arc::new(PostgresAccountRepository::new(pool.clone())),
            setup: Arc::new(PostgresSetupRepository::new(pool)),
        }
    }

    /// Connect, migrate, and wire PostgreSQL repositories
    pub async fn connect_postgres(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = connect_pool(config).await?;
        run_storage_migrations(&pool).await?;
        Ok(Self::postgres(pool))
    }
}
