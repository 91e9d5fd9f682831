//! PostgreSQL account and setup repositories

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::account::{
    Account, AccountId, AccountRepository, AccountRole, AccountStatus, SetupRepository, TenantId,
};
use crate::domain::DomainError;

/// PostgreSQL implementation of AccountRepository
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        let row = sqlx::query(
            "SELECT id, tenant_id, name, status, role FROM accounts WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get account: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, account: Account) -> Result<Account, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, tenant_id, name, status, role)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET tenant_id = EXCLUDED.tenant_id, name = EXCLUDED.name,
                status = EXCLUDED.status, role = EXCLUDED.role
            "#,
        )
        .bind(account.id().as_str())
        .bind(account.tenant_id().as_str())
        .bind(account.name())
        .bind(account.status().as_str())
        .bind(account.role().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to save account: {}", e)))?;

        Ok(account)
    }
}

fn row_to_account(row: &sqlx::postgres::PgRow) -> Result<Account, DomainError> {
    let id: String = row.get("id");
    let tenant_id: String = row.get("tenant_id");
    let name: String = row.get("name");
    let status: String = row.get("status");
    let role: String = row.get("role");

    let status = AccountStatus::from_str(&status)
        .ok_or_else(|| DomainError::storage(format!("Invalid account status in database: {}", status)))?;
    let role = AccountRole::from_str(&role)
        .ok_or_else(|| DomainError::storage(format!("Invalid account role in database: {}", role)))?;

    Ok(Account::new(AccountId::from(id), TenantId::from(tenant_id), name, role).with_status(status))
}

/// Setup status backed by the `setups` table
#[derive(Debug, Clone)]
pub struct PostgresSetupRepository {
    pool: PgPool,
}

impl PostgresSetupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SetupRepository for PostgresSetupRepository {
    async fn is_setup_complete(&self) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM setups)")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to read setup status: {}", e)))
    }

    async fn mark_setup_complete(&self) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO setups (version) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(env!("CARGO_PKG_VERSION"))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to record setup: {}", e)))?;

        Ok(())
    }
}
