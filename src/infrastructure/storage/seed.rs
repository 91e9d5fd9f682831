//! Fixture loading for development and tests
//!
//! A seed file describes accounts, apps, draft workflows and previously
//! observed draft variables as JSON. It is applied through the repositories;
//! the binary only loads it into the in-memory backend.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::domain::account::{Account, AccountId, AccountRole, AccountStatus, TenantId};
use crate::domain::app::{App, AppId, AppMode};
use crate::domain::draft_variable::{
    DraftVariable, Segment, VariableScope, ENVIRONMENT_VARIABLE_NODE_ID,
};
use crate::domain::workflow::{ConversationVariable, EnvironmentVariable, Workflow};
use crate::domain::DomainError;

use super::factory::Repositories;

#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    #[serde(default = "default_setup_complete")]
    pub setup_complete: bool,
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,
    #[serde(default)]
    pub apps: Vec<SeedApp>,
    #[serde(default)]
    pub workflows: Vec<SeedWorkflow>,
    #[serde(default)]
    pub variables: Vec<SeedVariable>,
}

fn default_setup_complete() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedAccount {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub role: AccountRole,
    #[serde(default = "default_account_status")]
    pub status: AccountStatus,
}

fn default_account_status() -> AccountStatus {
    AccountStatus::Active
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedApp {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub mode: AppMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedWorkflow {
    pub app_id: String,
    #[serde(default)]
    pub environment_variables: Vec<EnvironmentVariable>,
    #[serde(default)]
    pub conversation_variables: Vec<ConversationVariable>,
}

/// A draft variable as a debug run would have left it
#[derive(Debug, Clone, Deserialize)]
pub struct SeedVariable {
    pub app_id: String,
    pub node_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub value: serde_json::Value,
}

impl SeedVariable {
    fn into_variable(self) -> Result<DraftVariable, DomainError> {
        if self.node_id == ENVIRONMENT_VARIABLE_NODE_ID {
            return Err(DomainError::configuration(format!(
                "environment variables cannot be seeded as draft variables, name={}",
                self.name
            )));
        }

        let variable = DraftVariable::new(
            AppId::from(self.app_id),
            VariableScope::from_node_id(self.node_id),
            self.name,
            Segment::infer(self.value),
        );

        Ok(match self.description {
            Some(description) => variable.with_description(description),
            None => variable,
        })
    }
}

impl SeedData {
    /// Read and parse a seed file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, DomainError> {
        serde_json::from_str(content)
            .map_err(|e| DomainError::configuration(format!("Invalid seed file: {}", e)))
    }

    /// Write the fixture through the repositories
    pub async fn apply(self, repositories: &Repositories) -> Result<(), DomainError> {
        if self.setup_complete {
            repositories.setup.mark_setup_complete().await?;
        }

        let account_count = self.accounts.len();
        for seed in self.accounts {
            let account = Account::new(
                AccountId::from(seed.id),
                TenantId::from(seed.tenant_id),
                seed.name,
                seed.role,
            )
            .with_status(seed.status);
            repositories.accounts.save(account).await?;
        }

        let app_count = self.apps.len();
        for seed in self.apps {
            let app = App::new(
                AppId::from(seed.id),
                TenantId::from(seed.tenant_id),
                seed.name,
                seed.mode,
            );
            repositories.apps.save(app).await?;
        }

        let workflow_count = self.workflows.len();
        for seed in self.workflows {
            let mut workflow = Workflow::draft(AppId::from(seed.app_id));
            for variable in seed.environment_variables {
                workflow = workflow.with_environment_variable(variable);
            }
            for variable in seed.conversation_variables {
                variable.default_segment()?;
                workflow = workflow.with_conversation_variable(variable);
            }
            repositories.workflows.save_draft(workflow).await?;
        }

        let variable_count = self.variables.len();
        for seed in self.variables {
            repositories.draft_variables.create(seed.into_variable()?).await?;
        }

        info!(
            accounts = account_count,
            apps = app_count,
            workflows = workflow_count,
            variables = variable_count,
            "Seed data applied"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"{
        "accounts": [
            {"id": "acc-1", "tenant_id": "t-1", "name": "Ada", "role": "editor"}
        ],
        "apps": [
            {"id": "app-1", "tenant_id": "t-1", "name": "Support bot", "mode": "advanced-chat"}
        ],
        "workflows": [
            {
                "app_id": "app-1",
                "environment_variables": [
                    {"id": "env-1", "name": "api_url", "value_type": "string", "value": "https://example.com"}
                ],
                "conversation_variables": [
                    {"id": "cv-1", "name": "counter", "value_type": "number", "value": 0}
                ]
            }
        ],
        "variables": [
            {"app_id": "app-1", "node_id": "llm", "name": "text", "value": "hello"},
            {"app_id": "app-1", "node_id": "sys", "name": "query", "value": "hi"}
        ]
    }"#;

    #[test]
    fn test_parse_defaults() {
        let seed = SeedData::parse(SEED).unwrap();
        assert!(seed.setup_complete);
        assert_eq!(seed.accounts[0].status, AccountStatus::Active);
        assert_eq!(seed.workflows[0].conversation_variables.len(), 1);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let result = SeedData::parse("{not json");
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_apply_populates_repositories() {
        let repositories = Repositories::in_memory();
        SeedData::parse(SEED)
            .unwrap()
            .apply(&repositories)
            .await
            .unwrap();

        assert!(repositories.setup.is_setup_complete().await.unwrap());
        let app = repositories
            .apps
            .get(&AppId::from("app-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(app.mode(), AppMode::AdvancedChat);

        let workflow = repositories
            .workflows
            .get_draft(&AppId::from("app-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(workflow.environment_variables().len(), 1);
        assert!(workflow.conversation_variable("counter").is_some());

        let system = repositories
            .draft_variables
            .list_by_scope(&AppId::from("app-1"), &VariableScope::System)
            .await
            .unwrap();
        assert_eq!(system.len(), 1);
        assert_eq!(system[0].name(), "query");

        let node = repositories
            .draft_variables
            .list_by_scope(&AppId::from("app-1"), &VariableScope::Node("llm".to_string()))
            .await
            .unwrap();
        assert_eq!(node[0].value().value(), "hello");
        assert!(!node[0].is_edited());
    }

    #[tokio::test]
    async fn test_apply_rejects_environment_variable_rows() {
        let seed = r#"{"variables": [
            {"app_id": "a", "node_id": "env", "name": "api_url", "value": "x"}
        ]}"#;
        let repositories = Repositories::in_memory();
        let result = SeedData::parse(seed).unwrap().apply(&repositories).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_apply_rejects_duplicate_variables() {
        let seed = r#"{"variables": [
            {"app_id": "a", "node_id": "llm", "name": "text", "value": "x"},
            {"app_id": "a", "node_id": "llm", "name": "text", "value": "y"}
        ]}"#;
        let repositories = Repositories::in_memory();
        let result = SeedData::parse(seed).unwrap().apply(&repositories).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_apply_rejects_invalid_conversation_default() {
        let seed = r#"{"workflows": [{"app_id": "a", "conversation_variables": [
            {"id": "cv", "name": "n", "value_type": "number", "value": "oops"}
        ]}]}"#;
        let repositories = Repositories::in_memory();
        let result = SeedData::parse(seed).unwrap().apply(&repositories).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
