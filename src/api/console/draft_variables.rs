//! Draft variable endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::api::middleware::DraftAccess;
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, Json as ApiJson, PaginationQuery, PatchVariableRequest, Query, VariableListResponse,
    VariablePageResponse, VariableResponse,
};
use crate::domain::draft_variable::{DraftVariableId, Pagination};
use crate::infrastructure::services::ResetOutcome;

/// GET /console/api/apps/{app_id}/workflows/draft/variables
pub async fn list_variables(
    State(state): State<AppState>,
    access: DraftAccess,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<VariablePageResponse>, ApiError> {
    let pagination = Pagination::try_from(query)?;

    debug!(
        app_id = %access.app_id(),
        page = pagination.page(),
        limit = pagination.limit(),
        "Listing draft variables"
    );

    let page = state
        .draft_variable_service
        .list_without_values(access.app_id(), pagination)
        .await?;

    Ok(Json(VariablePageResponse::from(page)))
}

/// DELETE /console/api/apps/{app_id}/workflows/draft/variables
pub async fn delete_variables(
    State(state): State<AppState>,
    access: DraftAccess,
) -> Result<StatusCode, ApiError> {
    state
        .draft_variable_service
        .delete_all(access.app_id())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /console/api/apps/{app_id}/workflows/draft/nodes/{node_id}/variables
pub async fn list_node_variables(
    State(state): State<AppState>,
    access: DraftAccess,
    Path((_app_id, node_id)): Path<(String, String)>,
) -> Result<Json<VariableListResponse>, ApiError> {
    let variables = state
        .draft_variable_service
        .list_node(access.app_id(), &node_id)
        .await?;

    Ok(Json(VariableListResponse::from_views(&variables)))
}

/// DELETE /console/api/apps/{app_id}/workflows/draft/nodes/{node_id}/variables
pub async fn delete_node_variables(
    State(state): State<AppState>,
    access: DraftAccess,
    Path((_app_id, node_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .draft_variable_service
        .delete_node(access.app_id(), &node_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /console/api/apps/{app_id}/workflows/draft/variables/{variable_id}
pub async fn get_variable(
    State(state): State<AppState>,
    access: DraftAccess,
    Path((_app_id, variable_id)): Path<(String, String)>,
) -> Result<Json<VariableResponse>, ApiError> {
    let variable = state
        .draft_variable_service
        .get(access.app_id(), &DraftVariableId::from(variable_id))
        .await?;

    Ok(Json(VariableResponse::from_view(&variable)))
}

/// PATCH /console/api/apps/{app_id}/workflows/draft/variables/{variable_id}
pub async fn update_variable(
    State(state): State<AppState>,
    access: DraftAccess,
    Path((_app_id, variable_id)): Path<(String, String)>,
    ApiJson(request): ApiJson<PatchVariableRequest>,
) -> Result<Json<VariableResponse>, ApiError> {
    debug!(
        app_id = %access.app_id(),
        variable_id = %variable_id,
        rename = request.name.is_some(),
        revalue = request.value.is_some(),
        "Updating draft variable"
    );

    let variable = state
        .draft_variable_service
        .update(
            access.app_id(),
            &DraftVariableId::from(variable_id),
            request.into(),
        )
        .await?;

    Ok(Json(VariableResponse::from_view(&variable)))
}

/// DELETE /console/api/apps/{app_id}/workflows/draft/variables/{variable_id}
pub async fn delete_variable(
    State(state): State<AppState>,
    access: DraftAccess,
    Path((_app_id, variable_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .draft_variable_service
        .delete(access.app_id(), &DraftVariableId::from(variable_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /console/api/apps/{app_id}/workflows/draft/variables/{variable_id}/reset
///
/// Responds 204 when the variable was dropped instead of reset.
pub async fn reset_variable(
    State(state): State<AppState>,
    access: DraftAccess,
    Path((_app_id, variable_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let outcome = state
        .draft_variable_service
        .reset(access.app_id(), &DraftVariableId::from(variable_id))
        .await?;

    Ok(match outcome {
        ResetOutcome::Reset(variable) => Json(VariableResponse::from_view(&variable)).into_response(),
        ResetOutcome::Removed => StatusCode::NO_CONTENT.into_response(),
    })
}

/// GET /console/api/apps/{app_id}/workflows/draft/conversation-variables
pub async fn list_conversation_variables(
    State(state): State<AppState>,
    access: DraftAccess,
) -> Result<Json<VariableListResponse>, ApiError> {
    let variables = state
        .draft_variable_service
        .list_conversation(access.app_id())
        .await?;

    Ok(Json(VariableListResponse::from_views(&variables)))
}

/// GET /console/api/apps/{app_id}/workflows/draft/system-variables
pub async fn list_system_variables(
    State(state): State<AppState>,
    access: DraftAccess,
) -> Result<Json<VariableListResponse>, ApiError> {
    let variables = state
        .draft_variable_service
        .list_system(access.app_id())
        .await?;

    Ok(Json(VariableListResponse::from_views(&variables)))
}

/// GET /console/api/apps/{app_id}/workflows/draft/environment-variables
pub async fn list_environment_variables(
    State(state): State<AppState>,
    access: DraftAccess,
) -> Result<Json<VariableListResponse>, ApiError> {
    let variables = state
        .draft_variable_service
        .list_environment(access.app_id())
        .await?;

    Ok(Json(VariableListResponse::from_views(&variables)))
}
