//! Request and response bodies for draft variable endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::draft_variable::{
    Pagination, SegmentType, ValueView, VariablePage, VariableType, VariableView, DEFAULT_LIMIT,
    DEFAULT_PAGE,
};
use crate::domain::DomainError;
use crate::infrastructure::services::UpdateVariableRequest;

/// Variable without its value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableSummaryResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub variable_type: VariableType,
    pub name: String,
    pub description: String,
    pub selector: Vec<String>,
    pub value_type: SegmentType,
    pub edited: bool,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
}

impl VariableSummaryResponse {
    pub fn from_view(view: &impl VariableView) -> Self {
        Self {
            id: view.view_id().to_string(),
            variable_type: view.view_type(),
            name: view.view_name().to_string(),
            description: view.view_description().to_string(),
            selector: view.view_selector(),
            value_type: view.view_value_type(),
            edited: view.view_edited(),
            visible: view.view_visible(),
            editable: view.view_editable(),
        }
    }
}

/// Variable including its value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableResponse {
    #[serde(flatten)]
    pub summary: VariableSummaryResponse,
    pub value: Value,
}

impl VariableResponse {
    pub fn from_view(view: &impl ValueView) -> Self {
        Self {
            summary: VariableSummaryResponse::from_view(view),
            value: view.view_value().clone(),
        }
    }
}

/// Paginated overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariablePageResponse {
    pub items: Vec<VariableSummaryResponse>,
    pub total: usize,
}

impl From<VariablePage> for VariablePageResponse {
    fn from(page: VariablePage) -> Self {
        Self {
            items: page
                .variables
                .iter()
                .map(VariableSummaryResponse::from_view)
                .collect(),
            total: page.total,
        }
    }
}

/// Full, unpaginated listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableListResponse {
    pub items: Vec<VariableResponse>,
}

impl VariableListResponse {
    pub fn from_views<V: ValueView>(views: &[V]) -> Self {
        Self {
            items: views.iter().map(VariableResponse::from_view).collect(),
        }
    }
}

/// `page` and `limit` query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl TryFrom<PaginationQuery> for Pagination {
    type Error = DomainError;

    fn try_from(query: PaginationQuery) -> Result<Self, Self::Error> {
        Pagination::new(query.page, query.limit)
    }
}

/// PATCH body; both fields optional, anything else rejected
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchVariableRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// `null` is treated like an omitted field
    #[serde(default)]
    pub value: Option<Value>,
}

impl From<PatchVariableRequest> for UpdateVariableRequest {
    fn from(request: PatchVariableRequest) -> Self {
        Self {
            name: request.name,
            value: request.value,
        }
    }
}
