//! Value-less projection of a stored draft variable

use super::entity::{DraftVariable, DraftVariableId};
use super::scope::VariableScope;
use super::segment::SegmentType;

/// Everything about a draft variable except its value.
///
/// Paginated overviews load these so large values (files, objects) are never
/// materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftVariableSummary {
    pub id: DraftVariableId,
    pub scope: VariableScope,
    pub name: String,
    pub description: Option<String>,
    pub value_type: SegmentType,
    pub edited: bool,
    pub visible: bool,
}

impl From<&DraftVariable> for DraftVariableSummary {
    fn from(variable: &DraftVariable) -> Self {
        Self {
            id: variable.id().clone(),
            scope: variable.scope().clone(),
            name: variable.name().to_string(),
            description: variable.description().map(String::from),
            value_type: variable.value_type(),
            edited: variable.is_edited(),
            visible: variable.is_visible(),
        }
    }
}
