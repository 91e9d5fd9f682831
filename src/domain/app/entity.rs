//! App entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::account::TenantId;

/// App identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AppId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AppId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an app runs; only workflow-backed modes own draft variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppMode {
    Workflow,
    AdvancedChat,
    Chat,
    AgentChat,
    Completion,
}

impl AppMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workflow => "workflow",
            Self::AdvancedChat => "advanced-chat",
            Self::Chat => "chat",
            Self::AgentChat => "agent-chat",
            Self::Completion => "completion",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "workflow" => Some(Self::Workflow),
            "advanced-chat" => Some(Self::AdvancedChat),
            "chat" => Some(Self::Chat),
            "agent-chat" => Some(Self::AgentChat),
            "completion" => Some(Self::Completion),
            _ => None,
        }
    }

    /// Whether apps in this mode are edited as workflow graphs
    pub fn is_workflow_backed(&self) -> bool {
        matches!(self, Self::Workflow | Self::AdvancedChat)
    }
}

/// An app owned by a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    id: AppId,
    tenant_id: TenantId,
    name: String,
    mode: AppMode,
    created_at: DateTime<Utc>,
}

impl App {
    pub fn new(id: AppId, tenant_id: TenantId, name: impl Into<String>, mode: AppMode) -> Self {
        Self {
            id,
            tenant_id,
            name: name.into(),
            mode,
            created_at: Utc::now(),
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn id(&self) -> &AppId {
        &self.id
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
