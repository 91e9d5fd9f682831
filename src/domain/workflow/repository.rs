//! Workflow repository trait

use async_trait::async_trait;

use super::Workflow;
use crate::domain::app::AppId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Lookup of workflow definitions
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// The draft workflow of an app, if one was ever created
    async fn get_draft(&self, app_id: &AppId) -> Result<Option<Workflow>, DomainError>;

    /// Whether the app has a draft workflow
    async fn exists_draft(&self, app_id: &AppId) -> Result<bool, DomainError> {
        Ok(self.get_draft(app_id).await?.is_some())
    }

    /// Insert or replace the draft workflow of its app
    async fn save_draft(&self, workflow: Workflow) -> Result<Workflow, DomainError>;
}
