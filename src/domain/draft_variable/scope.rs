//! Variable scopes and the reserved node ids that encode them in storage

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Node id under which system variables are stored.
pub const SYSTEM_VARIABLE_NODE_ID: &str = "sys";

/// Node id under which conversation variables are stored.
pub const CONVERSATION_VARIABLE_NODE_ID: &str = "conversation";

/// Selector prefix of environment variables. Never stored as a row.
pub const ENVIRONMENT_VARIABLE_NODE_ID: &str = "env";

/// Where a stored draft variable lives.
///
/// Storage keeps every variable under a `node_id` string; the two reserved
/// scopes use sentinel ids. Conversion happens only at the storage boundary
/// through [`VariableScope::from_node_id`] and [`VariableScope::node_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VariableScope {
    /// Output of an ordinary workflow node
    Node(String),
    System,
    Conversation,
}

impl VariableScope {
    /// Decode the storage representation
    pub fn from_node_id(node_id: impl Into<String>) -> Self {
        let node_id = node_id.into();

        match node_id.as_str() {
            SYSTEM_VARIABLE_NODE_ID => Self::System,
            CONVERSATION_VARIABLE_NODE_ID => Self::Conversation,
            _ => Self::Node(node_id),
        }
    }

    /// Build a node scope from a caller-supplied id, rejecting reserved ids.
    ///
    /// System and conversation variables must go through their own
    /// endpoints, so the generic per-node path may diverge from them later.
    pub fn node(node_id: &str) -> Result<Self, DomainError> {
        if is_reserved_node_id(node_id) {
            return Err(DomainError::invalid_argument(format!(
                "invalid node_id, please use correspond api for conversation and system variables, node_id={}",
                node_id
            )));
        }

        if node_id.trim().is_empty() {
            return Err(DomainError::invalid_argument("node_id must not be empty"));
        }

        Ok(Self::Node(node_id.to_string()))
    }

    /// Storage representation
    pub fn node_id(&self) -> &str {
        match self {
            Self::Node(id) => id,
            Self::System => SYSTEM_VARIABLE_NODE_ID,
            Self::Conversation => CONVERSATION_VARIABLE_NODE_ID,
        }
    }

    pub fn variable_type(&self) -> VariableType {
        match self {
            Self::Node(_) => VariableType::Node,
            Self::System => VariableType::Sys,
            Self::Conversation => VariableType::Conversation,
        }
    }

    pub fn is_conversation(&self) -> bool {
        matches!(self, Self::Conversation)
    }
}

impl fmt::Display for VariableScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node_id())
    }
}

/// Returns true for node ids that the generic node endpoints must refuse
pub fn is_reserved_node_id(node_id: &str) -> bool {
    matches!(
        node_id,
        SYSTEM_VARIABLE_NODE_ID | CONVERSATION_VARIABLE_NODE_ID | ENVIRONMENT_VARIABLE_NODE_ID
    )
}

/// The `type` tag reported for a variable in API responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Node,
    Sys,
    Conversation,
    Env,
}

impl VariableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Sys => "sys",
            Self::Conversation => "conversation",
            Self::Env => "env",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_node_id_decodes_sentinels() {
        assert_eq!(VariableScope::from_node_id("sys"), VariableScope::System);
        assert_eq!(
            VariableScope::from_node_id("conversation"),
            VariableScope::Conversation
        );
        assert_eq!(
            VariableScope::from_node_id("llm_1"),
            VariableScope::Node("llm_1".to_string())
        );
    }

    #[test]
    fn test_node_id_round_trips_through_storage_form() {
        for scope in [
            VariableScope::System,
            VariableScope::Conversation,
            VariableScope::Node("start".to_string()),
        ] {
            assert_eq!(VariableScope::from_node_id(scope.node_id()), scope);
        }
    }

    #[test]
    fn test_node_rejects_reserved_ids() {
        for reserved in ["sys", "conversation", "env"] {
            let err = VariableScope::node(reserved).unwrap_err();
            assert!(matches!(err, DomainError::InvalidArgument { .. }));
            assert!(err.to_string().contains(reserved));
        }
    }

    #[test]
    fn test_node_rejects_blank_id() {
        assert!(VariableScope::node("  ").is_err());
    }

    #[test]
    fn test_node_accepts_ordinary_id() {
        let scope = VariableScope::node("1718000000000").unwrap();
        assert_eq!(scope.node_id(), "1718000000000");
        assert_eq!(scope.variable_type(), VariableType::Node);
    }

    #[test]
    fn test_variable_type_tags() {
        assert_eq!(VariableScope::System.variable_type().as_str(), "sys");
        assert_eq!(
            VariableScope::Conversation.variable_type().as_str(),
            "conversation"
        );
        assert_eq!(
            serde_json::to_string(&VariableType::Env).unwrap(),
            "\"env\""
        );
    }
}
