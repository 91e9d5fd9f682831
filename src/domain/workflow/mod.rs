//! Workflow domain - draft workflow definitions and their declared variables

mod entity;
mod repository;

pub use entity::{ConversationVariable, EnvironmentVariable, Workflow, WorkflowId, DRAFT_VERSION};
pub use repository::WorkflowRepository;
#[cfg(test)]
pub use repository::MockWorkflowRepository;
