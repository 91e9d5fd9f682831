//! PostgreSQL workflow repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::app::AppId;
use crate::domain::workflow::{
    ConversationVariable, EnvironmentVariable, Workflow, WorkflowId, WorkflowRepository,
    DRAFT_VERSION,
};
use crate::domain::DomainError;

/// PostgreSQL implementation of WorkflowRepository.
///
/// Declared variables are stored as JSONB arrays next to the workflow row.
#[derive(Debug, Clone)]
pub struct PostgresWorkflowRepository {
    pool: PgPool,
}

impl PostgresWorkflowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkflowRepository for PostgresWorkflowRepository {
    async fn get_draft(&self, app_id: &AppId) -> Result<Option<Workflow>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, app_id, version, environment_variables, conversation_variables,
                   created_at, updated_at
            FROM workflows
            WHERE app_id = $1 AND version = $2
            "#,
        )
        .bind(app_id.as_str())
        .bind(DRAFT_VERSION)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get draft workflow: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_workflow(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_draft(&self, app_id: &AppId) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM workflows WHERE app_id = $1 AND version = $2)",
        )
        .bind(app_id.as_str())
        .bind(DRAFT_VERSION)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to check draft workflow: {}", e)))
    }

    async fn save_draft(&self, workflow: Workflow) -> Result<Workflow, DomainError> {
        let environment_variables = serde_json::to_value(workflow.environment_variables())
            .map_err(|e| DomainError::storage(format!("Failed to encode variables: {}", e)))?;
        let conversation_variables = serde_json::to_value(workflow.conversation_variables())
            .map_err(|e| DomainError::storage(format!("Failed to encode variables: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO workflows (id, app_id, version, environment_variables,
                                   conversation_variables, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (app_id, version) DO UPDATE
            SET environment_variables = EXCLUDED.environment_variables,
                conversation_variables = EXCLUDED.conversation_variables,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(workflow.id().as_str())
        .bind(workflow.app_id().as_str())
        .bind(workflow.version())
        .bind(environment_variables)
        .bind(conversation_variables)
        .bind(workflow.created_at())
        .bind(workflow.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to save draft workflow: {}", e)))?;

        Ok(workflow)
    }
}

fn row_to_workflow(row: &sqlx::postgres::PgRow) -> Result<Workflow, DomainError> {
    let id: String = row.get("id");
    let app_id: String = row.get("app_id");
    let version: String = row.get("version");
    let environment_variables: serde_json::Value = row.get("environment_variables");
    let conversation_variables: serde_json::Value = row.get("conversation_variables");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    let environment_variables: Vec<EnvironmentVariable> = serde_json::from_value(environment_variables)
        .map_err(|e| DomainError::storage(format!("Invalid environment variables: {}", e)))?;
    let conversation_variables: Vec<ConversationVariable> = serde_json::from_value(conversation_variables)
        .map_err(|e| DomainError::storage(format!("Invalid conversation variables: {}", e)))?;

    let mut workflow = Workflow::draft(AppId::from(app_id))
        .with_id(WorkflowId::from(id))
        .with_version(version)
        .with_timestamps(created_at, updated_at);

    for variable in environment_variables {
        workflow = workflow.with_environment_variable(variable);
    }

    for variable in conversation_variables {
        workflow = workflow.with_conversation_variable(variable);
    }

    Ok(workflow)
}
