//! Console API - endpoints used by the workflow editor

pub mod draft_variables;

use axum::{
    routing::{get, put},
    Router,
};

use super::state::AppState;

/// Create console API router
pub fn create_console_router() -> Router<AppState> {
    Router::new()
        .route(
            "/apps/{app_id}/workflows/draft/variables",
            get(draft_variables::list_variables).delete(draft_variables::delete_variables),
        )
        .route(
            "/apps/{app_id}/workflows/draft/nodes/{node_id}/variables",
            get(draft_variables::list_node_variables)
                .delete(draft_variables::delete_node_variables),
        )
        .route(
            "/apps/{app_id}/workflows/draft/variables/{variable_id}",
            get(draft_variables::get_variable)
                .patch(draft_variables::update_variable)
                .delete(draft_variables::delete_variable),
        )
        .route(
            "/apps/{app_id}/workflows/draft/variables/{variable_id}/reset",
            put(draft_variables::reset_variable),
        )
        .route(
            "/apps/{app_id}/workflows/draft/conversation-variables",
            get(draft_variables::list_conversation_variables),
        )
        .route(
            "/apps/{app_id}/workflows/draft/system-variables",
            get(draft_variables::list_system_variables),
        )
        .route(
            "/apps/{app_id}/workflows/draft/environment-variables",
            get(draft_variables::list_environment_variables),
        )
}

#[cfg(test)]
mod tests;
