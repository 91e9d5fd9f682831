//! Draft variable service - inspection and editing of draft workflow variables

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::app::AppId;
use crate::domain::draft_variable::{
    DraftVariable, DraftVariableId, DraftVariableRepository, Pagination, VariablePage,
    VariableScope,
};
use crate::domain::workflow::{EnvironmentVariable, Workflow, WorkflowRepository};
use crate::domain::DomainError;
use crate::infrastructure::observability::{
    record_draft_variables_deleted, record_draft_variables_prefilled,
};

/// Partial update of a draft variable; absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateVariableRequest {
    pub name: Option<String>,
    pub value: Option<Value>,
}

impl UpdateVariableRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none()
    }
}

/// Result of resetting a conversation variable
#[derive(Debug, Clone, PartialEq)]
pub enum ResetOutcome {
    /// The declared default was restored
    Reset(DraftVariable),
    /// The workflow no longer declares the variable, so the row was dropped
    Removed,
}

/// Draft variable service over variable and workflow repositories
pub struct DraftVariableService {
    variables: Arc<dyn DraftVariableRepository>,
    workflows: Arc<dyn WorkflowRepository>,
}

impl std::fmt::Debug for DraftVariableService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftVariableService").finish_non_exhaustive()
    }
}

impl DraftVariableService {
    pub fn new(
        variables: Arc<dyn DraftVariableRepository>,
        workflows: Arc<dyn WorkflowRepository>,
    ) -> Self {
        Self {
            variables,
            workflows,
        }
    }

    async fn require_draft(&self, app_id: &AppId) -> Result<Workflow, DomainError> {
        self.workflows
            .get_draft(app_id)
            .await?
            .ok_or_else(|| DomainError::workflow_not_found(app_id.as_str()))
    }

    /// Load a variable owned by `app_id`; another app's variable is reported
    /// exactly like a missing one
    async fn require_variable(
        &self,
        app_id: &AppId,
        variable_id: &DraftVariableId,
    ) -> Result<DraftVariable, DomainError> {
        match self.variables.get(variable_id).await? {
            Some(variable) if variable.belongs_to(app_id) => Ok(variable),
            _ => Err(DomainError::variable_not_found(variable_id.as_str())),
        }
    }

    /// One page of value-less summaries for the app
    pub async fn list_variables_without_values(
        &self,
        app_id: &AppId,
        pagination: Pagination,
    ) -> Result<VariablePage, DomainError> {
        if !self.workflows.exists_draft(app_id).await? {
            return Err(DomainError::workflow_not_found(app_id.as_str()));
        }

        let page = self.variables.list_page(app_id, pagination).await?;

        debug!(
            app_id = %app_id,
            page = pagination.page(),
            limit = pagination.limit(),
            returned = page.variables.len(),
            total = page.total,
            "Listed draft variables"
        );

        Ok(page)
    }

    pub async fn list_node_variables(
        &self,
        app_id: &AppId,
        node_id: &str,
    ) -> Result<Vec<DraftVariable>, DomainError> {
        let scope = VariableScope::node(node_id)?;
        self.variables.list_by_scope(app_id, &scope).await
    }

    pub async fn list_conversation_variables(
        &self,
        app_id: &AppId,
    ) -> Result<Vec<DraftVariable>, DomainError> {
        self.variables
            .list_by_scope(app_id, &VariableScope::Conversation)
            .await
    }

    pub async fn list_system_variables(
        &self,
        app_id: &AppId,
    ) -> Result<Vec<DraftVariable>, DomainError> {
        self.variables
            .list_by_scope(app_id, &VariableScope::System)
            .await
    }

    /// Environment variables come from the workflow definition, never from rows
    pub async fn list_environment_variables(
        &self,
        app_id: &AppId,
    ) -> Result<Vec<EnvironmentVariable>, DomainError> {
        let workflow = self.require_draft(app_id).await?;
        Ok(workflow.environment_variables().to_vec())
    }

    /// Materialize missing conversation defaults, then list conversation rows
    pub async fn list_conversation_variables_with_prefill(
        &self,
        app_id: &AppId,
    ) -> Result<Vec<DraftVariable>, DomainError> {
        let workflow = self.require_draft(app_id).await?;
        self.prefill_conversation_defaults(&workflow).await?;
        self.list_conversation_variables(app_id).await
    }

    pub async fn get_variable(
        &self,
        app_id: &AppId,
        variable_id: &DraftVariableId,
    ) -> Result<DraftVariable, DomainError> {
        self.require_variable(app_id, variable_id).await
    }

    /// Apply a partial update.
    ///
    /// An empty request returns the stored variable unchanged. A new value
    /// must fit the variable's declared type.
    pub async fn update_variable(
        &self,
        app_id: &AppId,
        variable_id: &DraftVariableId,
        request: UpdateVariableRequest,
    ) -> Result<DraftVariable, DomainError> {
        let mut variable = self.require_variable(app_id, variable_id).await?;

        if request.is_empty() {
            return Ok(variable);
        }

        if !variable.is_editable() {
            return Err(DomainError::invalid_argument(format!(
                "variable is not editable, id={}, node_id={}, name={}",
                variable.id(),
                variable.node_id(),
                variable.name()
            )));
        }

        if let Some(name) = request.name {
            variable.rename(name)?;
        }

        if let Some(value) = request.value {
            variable.set_value(value)?;
        }

        let variable = self.variables.update(variable).await?;

        info!(
            app_id = %app_id,
            variable_id = %variable.id(),
            node_id = variable.node_id(),
            name = variable.name(),
            "Draft variable updated"
        );

        Ok(variable)
    }

    pub async fn delete_variable(
        &self,
        app_id: &AppId,
        variable_id: &DraftVariableId,
    ) -> Result<(), DomainError> {
        let variable = self.require_variable(app_id, variable_id).await?;

        if !self.variables.delete(variable.id()).await? {
            return Err(DomainError::variable_not_found(variable_id.as_str()));
        }

        record_draft_variables_deleted("variable", 1);
        debug!(app_id = %app_id, variable_id = %variable_id, "Draft variable deleted");

        Ok(())
    }

    pub async fn delete_node_variables(
        &self,
        app_id: &AppId,
        node_id: &str,
    ) -> Result<u64, DomainError> {
        let scope = VariableScope::node(node_id)?;
        let deleted = self.variables.delete_by_scope(app_id, &scope).await?;

        record_draft_variables_deleted("node", deleted);
        info!(app_id = %app_id, node_id, deleted, "Node draft variables deleted");

        Ok(deleted)
    }

    pub async fn delete_app_variables(&self, app_id: &AppId) -> Result<u64, DomainError> {
        let deleted = self.variables.delete_by_app(app_id).await?;

        record_draft_variables_deleted("app", deleted);
        info!(app_id = %app_id, deleted, "All draft variables deleted");

        Ok(deleted)
    }

    /// Reset a variable by id against the app's draft workflow
    pub async fn reset_variable(
        &self,
        app_id: &AppId,
        variable_id: &DraftVariableId,
    ) -> Result<ResetOutcome, DomainError> {
        let workflow = self.require_draft(app_id).await?;
        let variable = self.require_variable(app_id, variable_id).await?;
        self.reset_conversation_variable(&workflow, variable).await
    }

    /// Restore the declared default of a conversation variable.
    ///
    /// When the workflow no longer declares the name there is nothing to
    /// restore and the row is deleted instead.
    pub async fn reset_conversation_variable(
        &self,
        workflow: &Workflow,
        mut variable: DraftVariable,
    ) -> Result<ResetOutcome, DomainError> {
        if !variable.scope().is_conversation() {
            return Err(DomainError::invalid_argument(format!(
                "variable is not a conversation variable, id={}, node_id={}, name={}",
                variable.id(),
                variable.node_id(),
                variable.name()
            )));
        }

        let Some(declared) = workflow.conversation_variable(variable.name()) else {
            self.variables.delete(variable.id()).await?;
            record_draft_variables_deleted("reset", 1);
            info!(
                app_id = %workflow.app_id(),
                variable_id = %variable.id(),
                name = variable.name(),
                "Undeclared conversation variable removed on reset"
            );
            return Ok(ResetOutcome::Removed);
        };

        variable.reset_to(declared.default_segment()?);
        let variable = self.variables.update(variable).await?;

        info!(
            app_id = %workflow.app_id(),
            variable_id = %variable.id(),
            name = variable.name(),
            "Conversation variable reset to default"
        );

        Ok(ResetOutcome::Reset(variable))
    }

    /// Insert a default-valued row for every declared conversation variable
    /// that has none yet. Declarations whose default does not match their
    /// type are skipped. Returns the number of rows inserted.
    pub async fn prefill_conversation_defaults(
        &self,
        workflow: &Workflow,
    ) -> Result<usize, DomainError> {
        let declared = workflow.conversation_variables();
        if declared.is_empty() {
            return Ok(0);
        }

        let candidates: Vec<DraftVariable> = declared
            .iter()
            .filter_map(|declaration| match declaration.default_segment() {
                Ok(default) => Some(DraftVariable::new_conversation_variable(
                    workflow.app_id().clone(),
                    declaration.name.clone(),
                    default,
                    declaration.description().map(String::from),
                )),
                Err(e) => {
                    warn!(
                        app_id = %workflow.app_id(),
                        name = %declaration.name,
                        error = %e,
                        "Skipping conversation variable with invalid default"
                    );
                    None
                }
            })
            .collect();

        if candidates.is_empty() {
            return Ok(0);
        }

        let inserted = self.variables.insert_if_absent(candidates).await?;

        if inserted > 0 {
            record_draft_variables_prefilled(inserted);
            info!(
                app_id = %workflow.app_id(),
                inserted,
                "Conversation variables prefilled from workflow defaults"
            );
        }

        Ok(inserted)
    }
}
