//! Console prerequisite chain for draft workflow endpoints
//!
//! Checks run in a fixed order and stop at the first failure. Apart from an
//! unknown app, every failure is reported as a bare `403 Forbidden`.

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Path},
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::account::Account;
use crate::domain::app::{App, AppId};
use crate::domain::DomainError;

/// A single prerequisite of the console API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
    /// The installation finished its setup
    SetupRequired,
    /// A valid bearer token resolves to an account
    LoginRequired,
    /// The account finished onboarding
    AccountInitializationRequired,
    /// The path app exists in the account's tenant and is workflow-backed
    WorkflowAppRequired,
    /// The account may edit apps
    EditorRequired,
}

/// Order in which draft variable endpoints are checked
pub const DRAFT_VARIABLE_PREREQUISITES: [Prerequisite; 5] = [
    Prerequisite::SetupRequired,
    Prerequisite::LoginRequired,
    Prerequisite::AccountInitializationRequired,
    Prerequisite::WorkflowAppRequired,
    Prerequisite::EditorRequired,
];

/// What the chain learns about the caller as it runs
#[derive(Debug, Default)]
struct GuardContext {
    app_id: Option<AppId>,
    account: Option<Account>,
    app: Option<App>,
}

impl Prerequisite {
    async fn check(
        self,
        headers: &HeaderMap,
        state: &AppState,
        context: &mut GuardContext,
    ) -> Result<(), DomainError> {
        match self {
            Self::SetupRequired => {
                if !state.setup_repository.is_setup_complete().await? {
                    return Err(DomainError::Forbidden);
                }
            }
            Self::LoginRequired => {
                let token = bearer_token(headers).ok_or(DomainError::Forbidden)?;
                let claims = state
                    .jwt_service
                    .validate(token)
                    .map_err(|_| DomainError::Forbidden)?;
                let account = state
                    .account_repository
                    .get(&claims.account_id())
                    .await?
                    .ok_or(DomainError::Forbidden)?;
                context.account = Some(account);
            }
            Self::AccountInitializationRequired => {
                let account = context.account.as_ref().ok_or(DomainError::Forbidden)?;
                if !account.is_initialized() {
                    return Err(DomainError::Forbidden);
                }
            }
            Self::WorkflowAppRequired => {
                let account = context.account.as_ref().ok_or(DomainError::Forbidden)?;
                let app_id = context.app_id.as_ref().ok_or(DomainError::Forbidden)?;

                let app = state
                    .app_repository
                    .get(app_id)
                    .await?
                    .filter(|app| app.tenant_id() == account.tenant_id())
                    .ok_or_else(|| {
                        DomainError::not_found(format!("app not found, id={}", app_id))
                    })?;

                if !app.mode().is_workflow_backed() {
                    return Err(DomainError::Forbidden);
                }
                context.app = Some(app);
            }
            Self::EditorRequired => {
                let account = context.account.as_ref().ok_or(DomainError::Forbidden)?;
                if !account.is_editor() {
                    return Err(DomainError::Forbidden);
                }
            }
        }

        Ok(())
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Run `prerequisites` in order for the app named in the request path
async fn run_prerequisites(
    prerequisites: &[Prerequisite],
    headers: &HeaderMap,
    app_id: Option<AppId>,
    state: &AppState,
) -> Result<GuardContext, DomainError> {
    let mut context = GuardContext {
        app_id,
        ..Default::default()
    };

    for prerequisite in prerequisites {
        if let Err(e) = prerequisite.check(headers, state, &mut context).await {
            debug!(?prerequisite, error = %e, "Console prerequisite failed");
            return Err(e);
        }
    }

    Ok(context)
}

/// Extractor granting editor access to a workflow app's draft
#[derive(Debug, Clone)]
pub struct DraftAccess {
    pub account: Account,
    pub app: App,
}

impl DraftAccess {
    pub fn app_id(&self) -> &AppId {
        self.app.id()
    }
}

impl FromRequestParts<AppState> for DraftAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let app_id = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|Path(params)| params.get("app_id").cloned())
            .map(AppId::from);

        let context =
            run_prerequisites(&DRAFT_VARIABLE_PREREQUISITES, &parts.headers, app_id, state)
                .await?;

        match (context.account, context.app) {
            (Some(account), Some(app)) => Ok(DraftAccess { account, app }),
            _ => Err(ApiError::forbidden()),
        }
    }
}
