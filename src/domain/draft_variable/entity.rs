//! Draft variable entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::scope::{VariableScope, VariableType};
use super::segment::{Segment, SegmentType};
use crate::domain::app::AppId;
use crate::domain::DomainError;

/// System variables a user may overwrite while debugging a draft
const EDITABLE_SYSTEM_VARIABLES: &[&str] = &["query", "files"];

/// Opaque draft variable identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftVariableId(String);

impl DraftVariableId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DraftVariableId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DraftVariableId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for DraftVariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A variable observed or declared while editing a draft workflow
#[derive(Debug, Clone, PartialEq)]
pub struct DraftVariable {
    id: DraftVariableId,
    app_id: AppId,
    scope: VariableScope,
    name: String,
    description: Option<String>,
    value: Segment,
    visible: bool,
    /// Set when a user overwrites the value; `None` means untouched
    last_edited_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DraftVariable {
    /// Create a new, unedited variable
    pub fn new(
        app_id: AppId,
        scope: VariableScope,
        name: impl Into<String>,
        value: Segment,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: DraftVariableId::generate(),
            app_id,
            scope,
            name: name.into(),
            description: None,
            value,
            visible: true,
            last_edited_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a conversation variable holding its declared default
    pub fn new_conversation_variable(
        app_id: AppId,
        name: impl Into<String>,
        value: Segment,
        description: Option<String>,
    ) -> Self {
        let mut variable = Self::new(app_id, VariableScope::Conversation, name, value);
        variable.description = description;
        variable
    }

    pub fn with_id(mut self, id: DraftVariableId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_last_edited_at(mut self, last_edited_at: Option<DateTime<Utc>>) -> Self {
        self.last_edited_at = last_edited_at;
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    // Getters

    pub fn id(&self) -> &DraftVariableId {
        &self.id
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    pub fn scope(&self) -> &VariableScope {
        &self.scope
    }

    pub fn node_id(&self) -> &str {
        self.scope.node_id()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn value(&self) -> &Segment {
        &self.value
    }

    pub fn value_type(&self) -> SegmentType {
        self.value.value_type()
    }

    pub fn variable_type(&self) -> VariableType {
        self.scope.variable_type()
    }

    /// Path used by workflow expressions to reference this variable
    pub fn selector(&self) -> Vec<String> {
        vec![self.scope.node_id().to_string(), self.name.clone()]
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_edited(&self) -> bool {
        self.last_edited_at.is_some()
    }

    pub fn is_editable(&self) -> bool {
        match &self.scope {
            VariableScope::System => EDITABLE_SYSTEM_VARIABLES.contains(&self.name.as_str()),
            _ => true,
        }
    }

    pub fn belongs_to(&self, app_id: &AppId) -> bool {
        &self.app_id == app_id
    }

    pub fn last_edited_at(&self) -> Option<DateTime<Utc>> {
        self.last_edited_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutations

    /// Rename the variable; the selector follows automatically
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("variable name must not be empty"));
        }

        self.name = name;
        self.mark_edited();
        Ok(())
    }

    /// Overwrite the value, keeping the declared type
    pub fn set_value(&mut self, raw: Value) -> Result<(), DomainError> {
        self.value = Segment::build(self.value_type(), raw)?;
        self.mark_edited();
        Ok(())
    }

    /// Restore a default value and forget any user edit
    pub fn reset_to(&mut self, value: Segment) {
        self.value = value;
        self.last_edited_at = None;
        self.updated_at = Utc::now();
    }

    fn mark_edited(&mut self) {
        let now = Utc::now();
        self.last_edited_at = Some(now);
        self.updated_at = now;
    }
}
