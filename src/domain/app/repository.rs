//! App repository trait

use async_trait::async_trait;

use super::{App, AppId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Read access to apps
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AppRepository: Send + Sync {
    async fn get(&self, id: &AppId) -> Result<Option<App>, DomainError>;

    /// Insert or replace an app
    async fn save(&self, app: App) -> Result<App, DomainError>;
}
