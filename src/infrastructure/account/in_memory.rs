//! In-memory account and setup repositories

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::{Account, AccountId, AccountRepository, SetupRepository};
use crate::domain::DomainError;

/// In-memory implementation of AccountRepository
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let map = accounts
            .into_iter()
            .map(|a| (a.id().as_str().to_string(), a))
            .collect();

        Self {
            accounts: RwLock::new(map),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().await.get(id.as_str()).cloned())
    }

    async fn save(&self, account: Account) -> Result<Account, DomainError> {
        self.accounts
            .write()
            .await
            .insert(account.id().as_str().to_string(), account.clone());
        Ok(account)
    }
}

/// In-memory setup flag
#[derive(Debug, Default)]
pub struct InMemorySetupRepository {
    complete: AtomicBool,
}

impl InMemorySetupRepository {
    pub fn new(complete: bool) -> Self {
        Self {
            complete: AtomicBool::new(complete),
        }
    }
}

#[async_trait]
impl SetupRepository for InMemorySetupRepository {
    async fn is_setup_complete(&self) -> Result<bool, DomainError> {
        Ok(self.complete.load(Ordering::SeqCst))
    }

    async fn mark_setup_complete(&self) -> Result<(), DomainError> {
        self.complete.store(true, Ordering::SeqCst);
        Ok(())
    }
}
