//! In-memory draft variable repository

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::app::AppId;
use crate::domain::draft_variable::{
    DraftVariable, DraftVariableId, DraftVariableRepository, DraftVariableSummary, Pagination,
    VariablePage, VariableScope,
};
use crate::domain::DomainError;

/// In-memory implementation of DraftVariableRepository.
///
/// Rows are kept in insertion order, which is the listing order.
#[derive(Debug, Default)]
pub struct InMemoryDraftVariableRepository {
    variables: RwLock<Vec<DraftVariable>>,
}

impl InMemoryDraftVariableRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with variables
    pub fn with_variables(variables: Vec<DraftVariable>) -> Self {
        Self {
            variables: RwLock::new(variables),
        }
    }
}

fn same_key(a: &DraftVariable, b: &DraftVariable) -> bool {
    a.app_id() == b.app_id() && a.scope() == b.scope() && a.name() == b.name()
}

fn conflict(variable: &DraftVariable) -> DomainError {
    DomainError::conflict(format!(
        "variable '{}' already exists in node '{}'",
        variable.name(),
        variable.node_id()
    ))
}

#[async_trait]
impl DraftVariableRepository for InMemoryDraftVariableRepository {
    async fn get(&self, id: &DraftVariableId) -> Result<Option<DraftVariable>, DomainError> {
        let variables = self.variables.read().await;
        Ok(variables.iter().find(|v| v.id() == id).cloned())
    }

    async fn list_page(
        &self,
        app_id: &AppId,
        pagination: Pagination,
    ) -> Result<VariablePage, DomainError> {
        let variables = self.variables.read().await;
        let owned: Vec<&DraftVariable> = variables.iter().filter(|v| v.belongs_to(app_id)).collect();

        Ok(VariablePage {
            total: owned.len(),
            variables: owned
                .into_iter()
                .skip(pagination.offset())
                .take(pagination.limit() as usize)
                .map(DraftVariableSummary::from)
                .collect(),
        })
    }

    async fn list_by_scope(
        &self,
        app_id: &AppId,
        scope: &VariableScope,
    ) -> Result<Vec<DraftVariable>, DomainError> {
        let variables = self.variables.read().await;
        Ok(variables
            .iter()
            .filter(|v| v.belongs_to(app_id) && v.scope() == scope)
            .cloned()
            .collect())
    }

    async fn create(&self, variable: DraftVariable) -> Result<DraftVariable, DomainError> {
        let mut variables = self.variables.write().await;

        if variables.iter().any(|v| same_key(v, &variable)) {
            return Err(conflict(&variable));
        }

        variables.push(variable.clone());
        Ok(variable)
    }

    async fn insert_if_absent(&self, candidates: Vec<DraftVariable>) -> Result<usize, DomainError> {
        let mut variables = self.variables.write().await;
        let mut inserted = 0;

        for candidate in candidates {
            if variables.iter().any(|v| same_key(v, &candidate)) {
                continue;
            }
            variables.push(candidate);
            inserted += 1;
        }

        Ok(inserted)
    }

    async fn update(&self, variable: DraftVariable) -> Result<DraftVariable, DomainError> {
        let mut variables = self.variables.write().await;

        if variables
            .iter()
            .any(|v| v.id() != variable.id() && same_key(v, &variable))
        {
            return Err(conflict(&variable));
        }

        let slot = variables
            .iter_mut()
            .find(|v| v.id() == variable.id())
            .ok_or_else(|| DomainError::variable_not_found(variable.id().as_str()))?;

        *slot = variable.clone();
        Ok(variable)
    }

    async fn delete(&self, id: &DraftVariableId) -> Result<bool, DomainError> {
        let mut variables = self.variables.write().await;
        let before = variables.len();
        variables.retain(|v| v.id() != id);
        Ok(variables.len() != before)
    }

    async fn delete_by_scope(
        &self,
        app_id: &AppId,
        scope: &VariableScope,
    ) -> Result<u64, DomainError> {
        let mut variables = self.variables.write().await;
        let before = variables.len();
        variables.retain(|v| !(v.belongs_to(app_id) && v.scope() == scope));
        Ok((before - variables.len()) as u64)
    }

    async fn delete_by_app(&self, app_id: &AppId) -> Result<u64, DomainError> {
        let mut variables = self.variables.write().await;
        let before = variables.len();
        variables.retain(|v| !v.belongs_to(app_id));
        Ok((before - variables.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft_variable::Segment;
    use serde_json::json;

    fn app(id: &str) -> AppId {
        AppId::from(id)
    }

    fn node_var(app_id: &str, node: &str, name: &str) -> DraftVariable {
        DraftVariable::new(
            app(app_id),
            VariableScope::Node(node.to_string()),
            name,
            Segment::infer(json!(name)),
        )
    }

    #[tokio::test]
    async fn test_list_page_keeps_insertion_order_and_total() {
        let repo = InMemoryDraftVariableRepository::with_variables(vec![
            node_var("a", "n1", "x"),
            node_var("b", "n1", "other"),
            node_var("a", "n1", "y"),
            node_var("a", "n2", "z"),
        ]);

        let page = repo
            .list_page(&app("a"), Pagination::new(2, 2).unwrap())
            .await
            .unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.variables.len(), 1);
        assert_eq!(page.variables[0].name, "z");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_key() {
        let repo = InMemoryDraftVariableRepository::new();
        repo.create(node_var("a", "n1", "x")).await.unwrap();

        let err = repo.create(node_var("a", "n1", "x")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));

        // Same name in another node or app is fine
        repo.create(node_var("a", "n2", "x")).await.unwrap();
        repo.create(node_var("b", "n1", "x")).await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_if_absent_skips_existing() {
        let repo = InMemoryDraftVariableRepository::with_variables(vec![node_var("a", "n1", "x")]);

        let inserted = repo
            .insert_if_absent(vec![node_var("a", "n1", "x"), node_var("a", "n1", "y")])
            .await
            .unwrap();

        assert_eq!(inserted, 1);
        let all = repo
            .list_by_scope(&app("a"), &VariableScope::Node("n1".to_string()))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_update_rename_conflict() {
        let x = node_var("a", "n1", "x");
        let mut y = node_var("a", "n1", "y");
        let repo = InMemoryDraftVariableRepository::with_variables(vec![x, y.clone()]);

        y.rename("x").unwrap();
        let err = repo.update(y).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_variable() {
        let repo = InMemoryDraftVariableRepository::new();

        let err = repo.update(node_var("a", "n1", "x")).await.unwrap_err();
        assert!(matches!(err, DomainError::VariableNotFound { .. }));
    }

    #[tokio::test]
    async fn test_deletes() {
        let keep = node_var("b", "n1", "x");
        let keep_id = keep.id().clone();
        let repo = InMemoryDraftVariableRepository::with_variables(vec![
            node_var("a", "n1", "x"),
            node_var("a", "n1", "y"),
            node_var("a", "n2", "z"),
            keep,
        ]);

        let removed = repo
            .delete_by_scope(&app("a"), &VariableScope::Node("n1".to_string()))
            .await
            .unwrap();
        assert_eq!(removed, 2);

        assert_eq!(repo.delete_by_app(&app("a")).await.unwrap(), 1);
        assert_eq!(repo.delete_by_app(&app("a")).await.unwrap(), 0);

        assert!(repo.delete(&keep_id).await.unwrap());
        assert!(!repo.delete(&keep_id).await.unwrap());
    }
}
