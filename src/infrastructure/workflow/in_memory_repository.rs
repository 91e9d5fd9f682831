//! In-memory workflow repository implementation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::app::AppId;
use crate::domain::workflow::{Workflow, WorkflowRepository};
use crate::domain::DomainError;

/// In-memory implementation of WorkflowRepository, one draft per app
#[derive(Debug)]
pub struct InMemoryWorkflowRepository {
    drafts: Arc<RwLock<HashMap<String, Workflow>>>,
}

impl InMemoryWorkflowRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            drafts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a repository pre-populated with draft workflows
    pub fn with_workflows(workflows: Vec<Workflow>) -> Self {
        let map: HashMap<String, Workflow> = workflows
            .into_iter()
            .filter(|w| w.is_draft())
            .map(|w| (w.app_id().as_str().to_string(), w))
            .collect();

        Self {
            drafts: Arc::new(RwLock::new(map)),
        }
    }
}

impl Default for InMemoryWorkflowRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkflowRepository for InMemoryWorkflowRepository {
    async fn get_draft(&self, app_id: &AppId) -> Result<Option<Workflow>, DomainError> {
        let drafts = self.drafts.read().await;
        Ok(drafts.get(app_id.as_str()).cloned())
    }

    async fn exists_draft(&self, app_id: &AppId) -> Result<bool, DomainError> {
        let drafts = self.drafts.read().await;
        Ok(drafts.contains_key(app_id.as_str()))
    }

    async fn save_draft(&self, workflow: Workflow) -> Result<Workflow, DomainError> {
        if !workflow.is_draft() {
            return Err(DomainError::validation(format!(
                "workflow '{}' is not a draft",
                workflow.id().as_str()
            )));
        }

        let mut drafts = self.drafts.write().await;
        drafts.insert(workflow.app_id().as_str().to_string(), workflow.clone());
        Ok(workflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_draft_by_app() {
        let repo = InMemoryWorkflowRepository::with_workflows(vec![Workflow::draft(AppId::from("a"))]);

        assert!(repo.get_draft(&AppId::from("a")).await.unwrap().is_some());
        assert!(repo.exists_draft(&AppId::from("a")).await.unwrap());
        assert!(!repo.exists_draft(&AppId::from("b")).await.unwrap());
    }

    #[tokio::test]
    async fn test_published_versions_are_not_drafts() {
        let repo = InMemoryWorkflowRepository::new();
        let published = Workflow::draft(AppId::from("a")).with_version("2024-01-01");

        assert!(repo.save_draft(published).await.is_err());
        assert!(!repo.exists_draft(&AppId::from("a")).await.unwrap());
    }
}
