//! Account and setup repository traits

use async_trait::async_trait;

use super::{Account, AccountId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Read access to console accounts
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;

    /// Insert or replace an account
    async fn save(&self, account: Account) -> Result<Account, DomainError>;
}

/// Whether the installation has been through first-run setup
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SetupRepository: Send + Sync {
    async fn is_setup_complete(&self) -> Result<bool, DomainError>;

    async fn mark_setup_complete(&self) -> Result<(), DomainError>;
}
