//! Draft workflow definition and the variables it declares

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::app::AppId;
use crate::domain::draft_variable::{
    Segment, SegmentType, ValueView, VariableType, VariableView, ENVIRONMENT_VARIABLE_NODE_ID,
};
use crate::domain::DomainError;

/// Version tag of the editable workflow
pub const DRAFT_VERSION: &str = "draft";

/// Workflow identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowId(String);

impl WorkflowId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkflowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WorkflowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Environment variable declared on the workflow; configuration, not state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub value_type: SegmentType,
    pub value: Value,
}

impl EnvironmentVariable {
    pub fn new(name: impl Into<String>, value: Segment) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            value_type: value.value_type(),
            value: value.into_value(),
        }
    }

    pub fn selector(&self) -> Vec<String> {
        vec![ENVIRONMENT_VARIABLE_NODE_ID.to_string(), self.name.clone()]
    }
}

impl VariableView for EnvironmentVariable {
    fn view_id(&self) -> &str {
        &self.id
    }

    fn view_type(&self) -> VariableType {
        VariableType::Env
    }

    fn view_name(&self) -> &str {
        &self.name
    }

    fn view_description(&self) -> &str {
        &self.description
    }

    fn view_selector(&self) -> Vec<String> {
        self.selector()
    }

    fn view_value_type(&self) -> SegmentType {
        self.value_type
    }

    // Edits are not tracked for environment variables
    fn view_edited(&self) -> bool {
        false
    }

    fn view_visible(&self) -> bool {
        true
    }

    fn view_editable(&self) -> Option<bool> {
        Some(true)
    }
}

impl ValueView for EnvironmentVariable {
    fn view_value(&self) -> &Value {
        &self.value
    }
}

/// Conversation variable declared on the workflow with its default value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationVariable {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub value_type: SegmentType,
    pub value: Value,
}

impl ConversationVariable {
    pub fn new(name: impl Into<String>, default: Segment) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            value_type: default.value_type(),
            value: default.into_value(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The declared default as a typed segment
    pub fn default_segment(&self) -> Result<Segment, DomainError> {
        Segment::build(self.value_type, self.value.clone()).map_err(|e| {
            DomainError::validation(format!(
                "conversation variable '{}' declares an invalid default: {}",
                self.name, e
            ))
        })
    }

    pub fn description(&self) -> Option<&str> {
        if self.description.is_empty() {
            None
        } else {
            Some(&self.description)
        }
    }
}

/// The editable, not-yet-published workflow of an app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    id: WorkflowId,
    app_id: AppId,
    version: String,
    #[serde(default)]
    environment_variables: Vec<EnvironmentVariable>,
    #[serde(default)]
    conversation_variables: Vec<ConversationVariable>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Workflow {
    /// Create an empty draft workflow for an app
    pub fn draft(app_id: AppId) -> Self {
        let now = Utc::now();

        Self {
            id: WorkflowId::generate(),
            app_id,
            version: DRAFT_VERSION.to_string(),
            environment_variables: Vec::new(),
            conversation_variables: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: WorkflowId) -> Self {
        self.id = id;
        self
    }

    pub fn with_environment_variable(mut self, variable: EnvironmentVariable) -> Self {
        self.environment_variables.push(variable);
        self
    }

    pub fn with_conversation_variable(mut self, variable: ConversationVariable) -> Self {
        self.conversation_variables.push(variable);
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn id(&self) -> &WorkflowId {
        &self.id
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_draft(&self) -> bool {
        self.version == DRAFT_VERSION
    }

    pub fn environment_variables(&self) -> &[EnvironmentVariable] {
        &self.environment_variables
    }

    pub fn conversation_variables(&self) -> &[ConversationVariable] {
        &self.conversation_variables
    }

    pub fn conversation_variable(&self, name: &str) -> Option<&ConversationVariable> {
        self.conversation_variables.iter().find(|v| v.name == name)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_environment_variable_projection() {
        let env = EnvironmentVariable::new("API_BASE", Segment::infer(json!("https://x")));

        assert_eq!(env.view_type(), VariableType::Env);
        assert_eq!(env.view_selector(), vec!["env", "API_BASE"]);
        assert!(!env.view_edited());
        assert!(env.view_visible());
        assert_eq!(env.view_editable(), Some(true));
        assert_eq!(env.view_value(), &json!("https://x"));
    }

    #[test]
    fn test_conversation_variable_lookup() {
        let workflow = Workflow::draft(AppId::from("app-1"))
            .with_conversation_variable(ConversationVariable::new("counter", Segment::infer(json!(0))));

        assert!(workflow.is_draft());
        assert!(workflow.conversation_variable("counter").is_some());
        assert!(workflow.conversation_variable("missing").is_none());
    }

    #[test]
    fn test_invalid_declared_default_is_rejected() {
        let declared = ConversationVariable {
            id: "c1".to_string(),
            name: "counter".to_string(),
            description: String::new(),
            value_type: SegmentType::Number,
            value: json!("zero"),
        };

        let err = declared.default_segment().unwrap_err();
        assert!(err.to_string().contains("counter"));
    }

    #[test]
    fn test_workflow_deserializes_without_variables() {
        let workflow: Workflow = serde_json::from_value(json!({
            "id": "wf-1",
            "app_id": "app-1",
            "version": "draft",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert!(workflow.environment_variables().is_empty());
        assert!(workflow.conversation_variables().is_empty());
    }
}
