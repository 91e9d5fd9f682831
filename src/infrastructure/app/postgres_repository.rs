//! PostgreSQL app repository

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::account::TenantId;
use crate::domain::app::{App, AppId, AppMode, AppRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of AppRepository
#[derive(Debug, Clone)]
pub struct PostgresAppRepository {
    pool: PgPool,
}

impl PostgresAppRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppRepository for PostgresAppRepository {
    async fn get(&self, id: &AppId) -> Result<Option<App>, DomainError> {
        let row = sqlx::query("SELECT id, tenant_id, name, mode, created_at FROM apps WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get app: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: String = row.get("id");
        let tenant_id: String = row.get("tenant_id");
        let name: String = row.get("name");
        let mode: String = row.get("mode");
        let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

        let mode = AppMode::from_str(&mode)
            .ok_or_else(|| DomainError::storage(format!("Invalid app mode in database: {}", mode)))?;

        Ok(Some(
            App::new(AppId::from(id), TenantId::from(tenant_id), name, mode)
                .with_created_at(created_at),
        ))
    }

    async fn save(&self, app: App) -> Result<App, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO apps (id, tenant_id, name, mode, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET tenant_id = EXCLUDED.tenant_id, name = EXCLUDED.name, mode = EXCLUDED.mode
            "#,
        )
        .bind(app.id().as_str())
        .bind(app.tenant_id().as_str())
        .bind(app.name())
        .bind(app.mode().as_str())
        .bind(app.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to save app: {}", e)))?;

        Ok(app)
    }
}
