//! PostgreSQL draft variable repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::app::AppId;
use crate::domain::draft_variable::{
    DraftVariable, DraftVariableId, DraftVariableRepository, DraftVariableSummary, Pagination,
    Segment, SegmentType, VariablePage, VariableScope,
};
use crate::domain::DomainError;

const SELECT_COLUMNS: &str = r#"
    id, app_id, node_id, name, description, value_type, value, visible,
    last_edited_at, created_at, updated_at
"#;

/// PostgreSQL implementation of DraftVariableRepository.
///
/// `(app_id, node_id, name)` carries a unique index; listing order follows
/// the `seq` identity column.
#[derive(Debug, Clone)]
pub struct PostgresDraftVariableRepository {
    pool: PgPool,
}

impl PostgresDraftVariableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    let msg = e.to_string();
    msg.contains("duplicate key") || msg.contains("unique constraint")
}

fn map_write_error(e: sqlx::Error, variable: &DraftVariable, action: &str) -> DomainError {
    if is_unique_violation(&e) {
        DomainError::conflict(format!(
            "variable '{}' already exists in node '{}'",
            variable.name(),
            variable.node_id()
        ))
    } else {
        DomainError::storage(format!("Failed to {} draft variable: {}", action, e))
    }
}

#[async_trait]
impl DraftVariableRepository for PostgresDraftVariableRepository {
    async fn get(&self, id: &DraftVariableId) -> Result<Option<DraftVariable>, DomainError> {
        let query = format!(
            "SELECT {} FROM workflow_draft_variables WHERE id = $1",
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get draft variable: {}", e)))?;

        row.as_ref().map(row_to_variable).transpose()
    }

    async fn list_page(
        &self,
        app_id: &AppId,
        pagination: Pagination,
    ) -> Result<VariablePage, DomainError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM workflow_draft_variables WHERE app_id = $1")
                .bind(app_id.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to count draft variables: {}", e))
                })?;

        // The value column is deliberately not selected
        let rows = sqlx::query(
            r#"
            SELECT id, node_id, name, description, value_type, visible,
                   last_edited_at
            FROM workflow_draft_variables
            WHERE app_id = $1
            ORDER BY seq
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(app_id.as_str())
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list draft variables: {}", e)))?;

        let mut variables = Vec::with_capacity(rows.len());

        for row in rows {
            variables.push(row_to_summary(&row)?);
        }

        Ok(VariablePage {
            variables,
            total: total as usize,
        })
    }

    async fn list_by_scope(
        &self,
        app_id: &AppId,
        scope: &VariableScope,
    ) -> Result<Vec<DraftVariable>, DomainError> {
        let query = format!(
            "SELECT {} FROM workflow_draft_variables WHERE app_id = $1 AND node_id = $2 ORDER BY seq",
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(app_id.as_str())
            .bind(scope.node_id())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list draft variables: {}", e)))?;

        rows.iter().map(row_to_variable).collect()
    }

    async fn create(&self, variable: DraftVariable) -> Result<DraftVariable, DomainError> {
        insert_query(&variable, false)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &variable, "create"))?;

        Ok(variable)
    }

    async fn insert_if_absent(&self, variables: Vec<DraftVariable>) -> Result<usize, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;
        let mut inserted = 0usize;

        for variable in &variables {
            let result = insert_query(variable, true)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_write_error(e, variable, "prefill"))?;
            inserted += result.rows_affected() as usize;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit prefill: {}", e)))?;

        Ok(inserted)
    }

    async fn update(&self, variable: DraftVariable) -> Result<DraftVariable, DomainError> {
        let value = serde_json::to_value(variable.value().value())
            .map_err(|e| DomainError::storage(format!("Failed to encode value: {}", e)))?;

        let result = sqlx::query(
            r#"
            UPDATE workflow_draft_variables
            SET name = $2, description = $3, value_type = $4, value = $5,
                visible = $6, last_edited_at = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(variable.id().as_str())
        .bind(variable.name())
        .bind(variable.description())
        .bind(variable.value_type().as_str())
        .bind(value)
        .bind(variable.is_visible())
        .bind(variable.last_edited_at())
        .bind(variable.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &variable, "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::variable_not_found(variable.id().as_str()));
        }

        Ok(variable)
    }

    async fn delete(&self, id: &DraftVariableId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM workflow_draft_variables WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete draft variable: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_scope(
        &self,
        app_id: &AppId,
        scope: &VariableScope,
    ) -> Result<u64, DomainError> {
        let result =
            sqlx::query("DELETE FROM workflow_draft_variables WHERE app_id = $1 AND node_id = $2")
                .bind(app_id.as_str())
                .bind(scope.node_id())
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to delete node variables: {}", e))
                })?;

        Ok(result.rows_affected())
    }

    async fn delete_by_app(&self, app_id: &AppId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM workflow_draft_variables WHERE app_id = $1")
            .bind(app_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete app variables: {}", e)))?;

        Ok(result.rows_affected())
    }
}

fn insert_query(
    variable: &DraftVariable,
    skip_existing: bool,
) -> sqlx::query::Query<'static, sqlx::Postgres, sqlx::postgres::PgArguments> {
    let sql = if skip_existing {
        r#"
        INSERT INTO workflow_draft_variables
            (id, app_id, node_id, name, description, value_type, value, visible,
             last_edited_at, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (app_id, node_id, name) DO NOTHING
        "#
    } else {
        r#"
        INSERT INTO workflow_draft_variables
            (id, app_id, node_id, name, description, value_type, value, visible,
             last_edited_at, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#
    };

    sqlx::query(sql)
        .bind(variable.id().as_str().to_string())
        .bind(variable.app_id().as_str().to_string())
        .bind(variable.node_id().to_string())
        .bind(variable.name().to_string())
        .bind(variable.description().map(String::from))
        .bind(variable.value_type().as_str())
        .bind(variable.value().value().clone())
        .bind(variable.is_visible())
        .bind(variable.last_edited_at())
        .bind(variable.created_at())
        .bind(variable.updated_at())
}

fn parse_value_type(raw: &str) -> Result<SegmentType, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::storage(format!("Invalid value_type in database: {}", raw)))
}

fn row_to_variable(row: &PgRow) -> Result<DraftVariable, DomainError> {
    let id: String = row.get("id");
    let app_id: String = row.get("app_id");
    let node_id: String = row.get("node_id");
    let name: String = row.get("name");
    let description: Option<String> = row.get("description");
    let value_type: String = row.get("value_type");
    let value: serde_json::Value = row.get("value");
    let visible: bool = row.get("visible");
    let last_edited_at: Option<chrono::DateTime<chrono::Utc>> = row.get("last_edited_at");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    let segment = Segment::build(parse_value_type(&value_type)?, value)
        .map_err(|e| DomainError::storage(format!("Corrupt value for variable {}: {}", id, e)))?;

    let mut variable = DraftVariable::new(
        AppId::from(app_id),
        VariableScope::from_node_id(node_id),
        name,
        segment,
    )
    .with_id(DraftVariableId::from(id))
    .with_visible(visible)
    .with_last_edited_at(last_edited_at)
    .with_timestamps(created_at, updated_at);

    if let Some(description) = description {
        variable = variable.with_description(description);
    }

    Ok(variable)
}

fn row_to_summary(row: &PgRow) -> Result<DraftVariableSummary, DomainError> {
    let value_type: String = row.get("value_type");
    let last_edited_at: Option<chrono::DateTime<chrono::Utc>> = row.get("last_edited_at");
    let node_id: String = row.get("node_id");
    let id: String = row.get("id");

    Ok(DraftVariableSummary {
        id: DraftVariableId::from(id),
        scope: VariableScope::from_node_id(node_id),
        name: row.get("name"),
        description: row.get("description"),
        value_type: parse_value_type(&value_type)?,
        edited: last_edited_at.is_some(),
        visible: row.get("visible"),
    })
}
