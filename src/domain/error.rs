use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Draft workflow not found: app_id={app_id}")]
    WorkflowNotFound { app_id: String },

    /// Missing variable and variable owned by another app are deliberately
    /// the same error.
    #[error("variable not found, id={variable_id}")]
    VariableNotFound { variable_id: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Forbidden")]
    Forbidden,

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn workflow_not_found(app_id: impl Into<String>) -> Self {
        Self::WorkflowNotFound {
            app_id: app_id.into(),
        }
    }

    pub fn variable_not_found(variable_id: impl Into<String>) -> Self {
        Self::VariableNotFound {
            variable_id: variable_id.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_not_found_message_includes_id() {
        let error = DomainError::variable_not_found("abc-123");
        assert_eq!(error.to_string(), "variable not found, id=abc-123");
    }

    #[test]
    fn test_workflow_not_found_message() {
        let error = DomainError::workflow_not_found("app-1");
        assert_eq!(error.to_string(), "Draft workflow not found: app_id=app-1");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
    }

    #[test]
    fn test_forbidden_has_no_detail() {
        assert_eq!(DomainError::Forbidden.to_string(), "Forbidden");
    }
}
