//! Console account entity

use serde::{Deserialize, Serialize};

/// Account identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccountId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workspace identifier; apps and accounts belong to exactly one
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TenantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TenantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Lifecycle of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Invited but has not finished onboarding
    #[default]
    Pending,
    Active,
    Banned,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Banned => "banned",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "banned" => Some(Self::Banned),
            _ => None,
        }
    }
}

/// Role within the tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Owner,
    Admin,
    Editor,
    Normal,
    DatasetOperator,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Normal => "normal",
            Self::DatasetOperator => "dataset_operator",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            "normal" => Some(Self::Normal),
            "dataset_operator" => Some(Self::DatasetOperator),
            _ => None,
        }
    }

    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin | Self::Editor)
    }
}

/// A console user acting inside one tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    tenant_id: TenantId,
    name: String,
    status: AccountStatus,
    role: AccountRole,
}

impl Account {
    pub fn new(
        id: AccountId,
        tenant_id: TenantId,
        name: impl Into<String>,
        role: AccountRole,
    ) -> Self {
        Self {
            id,
            tenant_id,
            name: name.into(),
            status: AccountStatus::Active,
            role,
        }
    }

    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn role(&self) -> AccountRole {
        self.role
    }

    /// Onboarding finished and not banned
    pub fn is_initialized(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn is_editor(&self) -> bool {
        self.role.can_edit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(role: AccountRole) -> Account {
        Account::new(AccountId::from("acc-1"), TenantId::from("t-1"), "Ada", role)
    }

    #[test]
    fn test_editor_roles() {
        assert!(account(AccountRole::Owner).is_editor());
        assert!(account(AccountRole::Admin).is_editor());
        assert!(account(AccountRole::Editor).is_editor());
        assert!(!account(AccountRole::Normal).is_editor());
        assert!(!account(AccountRole::DatasetOperator).is_editor());
    }

    #[test]
    fn test_initialization_follows_status() {
        let active = account(AccountRole::Editor);
        assert!(active.is_initialized());

        let pending = account(AccountRole::Editor).with_status(AccountStatus::Pending);
        assert!(!pending.is_initialized());

        let banned = account(AccountRole::Editor).with_status(AccountStatus::Banned);
        assert!(!banned.is_initialized());
    }

    #[test]
    fn test_role_and_status_parsing() {
        assert_eq!(AccountRole::from_str("dataset_operator"), Some(AccountRole::DatasetOperator));
        assert_eq!(AccountRole::from_str("root"), None);
        assert_eq!(AccountStatus::from_str("banned"), Some(AccountStatus::Banned));
    }
}
