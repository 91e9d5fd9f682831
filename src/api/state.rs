//! Application state for shared services

use std::sync::Arc;

use crate::domain::account::{AccountRepository, SetupRepository};
use crate::domain::app::{AppId, AppRepository};
use crate::domain::draft_variable::{DraftVariable, DraftVariableId, Pagination, VariablePage};
use crate::domain::workflow::EnvironmentVariable;
use crate::domain::DomainError;
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::services::{DraftVariableService, ResetOutcome, UpdateVariableRequest};
use crate::infrastructure::storage::Repositories;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub draft_variable_service: Arc<dyn DraftVariableServiceTrait>,
    pub app_repository: Arc<dyn AppRepository>,
    pub account_repository: Arc<dyn AccountRepository>,
    pub setup_repository: Arc<dyn SetupRepository>,
    pub jwt_service: Arc<dyn JwtGenerator>,
}

/// Trait for draft variable service operations
#[async_trait::async_trait]
pub trait DraftVariableServiceTrait: Send + Sync {
    async fn list_without_values(
        &self,
        app_id: &AppId,
        pagination: Pagination,
    ) -> Result<VariablePage, DomainError>;
    async fn list_node(&self, app_id: &AppId, node_id: &str)
        -> Result<Vec<DraftVariable>, DomainError>;
    async fn list_conversation(&self, app_id: &AppId) -> Result<Vec<DraftVariable>, DomainError>;
    async fn list_system(&self, app_id: &AppId) -> Result<Vec<DraftVariable>, DomainError>;
    async fn list_environment(
        &self,
        app_id: &AppId,
    ) -> Result<Vec<EnvironmentVariable>, DomainError>;
    async fn get(&self, app_id: &AppId, id: &DraftVariableId)
        -> Result<DraftVariable, DomainError>;
    async fn update(
        &self,
        app_id: &AppId,
        id: &DraftVariableId,
        request: UpdateVariableRequest,
    ) -> Result<DraftVariable, DomainError>;
    async fn delete(&self, app_id: &AppId, id: &DraftVariableId) -> Result<(), DomainError>;
    async fn delete_node(&self, app_id: &AppId, node_id: &str) -> Result<u64, DomainError>;
    async fn delete_all(&self, app_id: &AppId) -> Result<u64, DomainError>;
    async fn reset(&self, app_id: &AppId, id: &DraftVariableId)
        -> Result<ResetOutcome, DomainError>;
}

#[async_trait::async_trait]
impl DraftVariableServiceTrait for DraftVariableService {
    async fn list_without_values(
        &self,
        app_id: &AppId,
        pagination: Pagination,
    ) -> Result<VariablePage, DomainError> {
        DraftVariableService::list_variables_without_values(self, app_id, pagination).await
    }

    async fn list_node(
        &self,
        app_id: &AppId,
        node_id: &str,
    ) -> Result<Vec<DraftVariable>, DomainError> {
        DraftVariableService::list_node_variables(self, app_id, node_id).await
    }

    async fn list_conversation(&self, app_id: &AppId) -> Result<Vec<DraftVariable>, DomainError> {
        DraftVariableService::list_conversation_variables_with_prefill(self, app_id).await
    }

    async fn list_system(&self, app_id: &AppId) -> Result<Vec<DraftVariable>, DomainError> {
        DraftVariableService::list_system_variables(self, app_id).await
    }

    async fn list_environment(
        &self,
        app_id: &AppId,
    ) -> Result<Vec<EnvironmentVariable>, DomainError> {
        DraftVariableService::list_environment_variables(self, app_id).await
    }

    async fn get(
        &self,
        app_id: &AppId,
        id: &DraftVariableId,
    ) -> Result<DraftVariable, DomainError> {
        DraftVariableService::get_variable(self, app_id, id).await
    }

    async fn update(
        &self,
        app_id: &AppId,
        id: &DraftVariableId,
        request: UpdateVariableRequest,
    ) -> Result<DraftVariable, DomainError> {
        DraftVariableService::update_variable(self, app_id, id, request).await
    }

    async fn delete(&self, app_id: &AppId, id: &DraftVariableId) -> Result<(), DomainError> {
        DraftVariableService::delete_variable(self, app_id, id).await
    }

    async fn delete_node(&self, app_id: &AppId, node_id: &str) -> Result<u64, DomainError> {
        DraftVariableService::delete_node_variables(self, app_id, node_id).await
    }

    async fn delete_all(&self, app_id: &AppId) -> Result<u64, DomainError> {
        DraftVariableService::delete_app_variables(self, app_id).await
    }

    async fn reset(
        &self,
        app_id: &AppId,
        id: &DraftVariableId,
    ) -> Result<ResetOutcome, DomainError> {
        DraftVariableService::reset_variable(self, app_id, id).await
    }
}

impl AppState {
    /// Wire services over a set of repositories
    pub fn from_repositories(repositories: Repositories, jwt_service: Arc<dyn JwtGenerator>) -> Self {
        let draft_variable_service = DraftVariableService::new(
            repositories.draft_variables.clone(),
            repositories.workflows.clone(),
        );

        Self {
            draft_variable_service: Arc::new(draft_variable_service),
            app_repository: repositories.apps,
            account_repository: repositories.accounts,
            setup_repository: repositories.setup,
            jwt_service,
        }
    }
}
