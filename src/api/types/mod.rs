//! Console API types

pub mod draft_variable;
pub mod error;
pub mod json;

pub use draft_variable::{
    PaginationQuery, PatchVariableRequest, VariableListResponse, VariablePageResponse,
    VariableResponse, VariableSummaryResponse,
};
pub use error::{ApiError, ApiErrorResponse};
pub use json::{Json, Query};
