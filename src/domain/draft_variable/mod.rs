//! Draft variable domain - identity, scoping, typed values and projections

mod entity;
mod pagination;
mod repository;
mod scope;
mod segment;
mod summary;
mod view;

pub use entity::{DraftVariable, DraftVariableId};
pub use pagination::{Pagination, VariablePage, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, MAX_PAGE};
pub use repository::DraftVariableRepository;
#[cfg(test)]
pub use repository::MockDraftVariableRepository;
pub use scope::{
    is_reserved_node_id, VariableScope, VariableType, CONVERSATION_VARIABLE_NODE_ID,
    ENVIRONMENT_VARIABLE_NODE_ID, SYSTEM_VARIABLE_NODE_ID,
};
pub use segment::{Segment, SegmentType};
pub use summary::DraftVariableSummary;
pub use view::{ValueView, VariableView};
