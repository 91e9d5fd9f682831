//! Draft variable repository trait

use async_trait::async_trait;

use super::{DraftVariable, DraftVariableId, Pagination, VariablePage, VariableScope};
use crate::domain::app::AppId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Persistence of draft variables.
///
/// Every multi-row write is atomic: callers never observe a partially
/// applied delete or prefill.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DraftVariableRepository: Send + Sync {
    /// Load a variable by id, regardless of owning app
    async fn get(&self, id: &DraftVariableId) -> Result<Option<DraftVariable>, DomainError>;

    /// One page of value-less summaries in creation order, plus the app total
    async fn list_page(
        &self,
        app_id: &AppId,
        pagination: Pagination,
    ) -> Result<VariablePage, DomainError>;

    /// All variables of one scope, values included, in creation order
    async fn list_by_scope(
        &self,
        app_id: &AppId,
        scope: &VariableScope,
    ) -> Result<Vec<DraftVariable>, DomainError>;

    /// Insert a single variable, as seed fixtures do; `(app, node, name)`
    /// collisions are a conflict
    async fn create(&self, variable: DraftVariable) -> Result<DraftVariable, DomainError>;

    /// Insert the variables whose `(app, node, name)` is free, skipping the
    /// rest. Returns the number inserted.
    async fn insert_if_absent(&self, variables: Vec<DraftVariable>) -> Result<usize, DomainError>;

    /// Persist changes to an existing variable
    async fn update(&self, variable: DraftVariable) -> Result<DraftVariable, DomainError>;

    /// Delete one variable, returns true if it existed
    async fn delete(&self, id: &DraftVariableId) -> Result<bool, DomainError>;

    /// Delete every variable of a scope, returns the number deleted
    async fn delete_by_scope(
        &self,
        app_id: &AppId,
        scope: &VariableScope,
    ) -> Result<u64, DomainError>;

    /// Delete every variable of an app, returns the number deleted
    async fn delete_by_app(&self, app_id: &AppId) -> Result<u64, DomainError>;
}
