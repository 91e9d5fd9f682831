//! In-memory app repository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::app::{App, AppId, AppRepository};
use crate::domain::DomainError;

/// In-memory implementation of AppRepository
#[derive(Debug, Default)]
pub struct InMemoryAppRepository {
    apps: RwLock<HashMap<String, App>>,
}

impl InMemoryAppRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_apps(apps: Vec<App>) -> Self {
        let map = apps
            .into_iter()
            .map(|a| (a.id().as_str().to_string(), a))
            .collect();

        Self {
            apps: RwLock::new(map),
        }
    }
}

#[async_trait]
impl AppRepository for InMemoryAppRepository {
    async fn get(&self, id: &AppId) -> Result<Option<App>, DomainError> {
        Ok(self.apps.read().await.get(id.as_str()).cloned())
    }

    async fn save(&self, app: App) -> Result<App, DomainError> {
        self.apps
            .write()
            .await
            .insert(app.id().as_str().to_string(), app.clone());
        Ok(app)
    }
}
