//! End-to-end tests of the console router over in-memory repositories

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::api::{create_router_with_state, AppState};
use crate::domain::account::AccountId;
use crate::domain::app::AppId;
use crate::domain::draft_variable::{DraftVariable, Segment, VariableScope};
use crate::infrastructure::auth::{JwtConfig, JwtGenerator, JwtService};
use crate::infrastructure::storage::{Repositories, SeedData};

const SEED: &str = r#"{
    "accounts": [
        {"id": "acc-editor", "tenant_id": "t-1", "name": "Editor", "role": "editor"},
        {"id": "acc-viewer", "tenant_id": "t-1", "name": "Viewer", "role": "normal"}
    ],
    "apps": [
        {"id": "app-wf", "tenant_id": "t-1", "name": "Workflow", "mode": "advanced-chat"},
        {"id": "app-nodraft", "tenant_id": "t-1", "name": "No draft", "mode": "workflow"},
        {"id": "app-chat", "tenant_id": "t-1", "name": "Chat", "mode": "chat"},
        {"id": "app-foreign", "tenant_id": "t-2", "name": "Foreign", "mode": "workflow"}
    ],
    "workflows": [
        {
            "app_id": "app-wf",
            "environment_variables": [
                {"id": "env-1", "name": "api_url", "value_type": "string", "value": "https://example.com"}
            ],
            "conversation_variables": [
                {"id": "cv-1", "name": "counter", "value_type": "number", "value": 0}
            ]
        },
        {"app_id": "app-foreign"}
    ]
}"#;

const BASE: &str = "/console/api/apps";

struct TestApp {
    router: Router,
    repositories: Repositories,
    editor_token: String,
    viewer_token: String,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_seed(SEED).await
    }

    async fn with_seed(seed: &str) -> Self {
        let repositories = Repositories::in_memory();
        SeedData::parse(seed)
            .unwrap()
            .apply(&repositories)
            .await
            .unwrap();

        let jwt = Arc::new(JwtService::new(JwtConfig::new("router-test", 1)));
        let editor_token = token_for(&repositories, jwt.as_ref(), "acc-editor").await;
        let viewer_token = token_for(&repositories, jwt.as_ref(), "acc-viewer").await;

        let state = AppState::from_repositories(repositories.clone(), jwt);

        Self {
            router: create_router_with_state(state),
            repositories,
            editor_token,
            viewer_token,
        }
    }

    async fn node_variable(&self, app: &str, node: &str, name: &str, value: Value) -> String {
        self.insert(DraftVariable::new(
            AppId::from(app),
            VariableScope::Node(node.to_string()),
            name,
            Segment::infer(value),
        ))
        .await
    }

    async fn insert(&self, variable: DraftVariable) -> String {
        self.repositories
            .draft_variables
            .create(variable)
            .await
            .unwrap()
            .id()
            .to_string()
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.editor_token.clone();
        self.send_as(Some(&token), method, uri, body).await
    }

    async fn send_as(
        &self,
        token: Option<&str>,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }
}

async fn token_for(repositories: &Repositories, jwt: &dyn JwtGenerator, id: &str) -> String {
    let account = repositories
        .accounts
        .get(&AccountId::from(id))
        .await
        .unwrap()
        .unwrap();
    jwt.generate(&account).unwrap()
}

fn variables_uri(app: &str) -> String {
    format!("{}/{}/workflows/draft/variables", BASE, app)
}

fn draft_uri(app: &str, rest: &str) -> String {
    format!("{}/{}/workflows/draft/{}", BASE, app, rest)
}

#[tokio::test]
async fn test_listing_without_draft_workflow_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::GET, &variables_uri("app-nodraft"), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "draft_workflow_not_exist");
}

#[tokio::test]
async fn test_summary_listing_pages_without_values() {
    let app = TestApp::new().await;
    for name in ["a", "b", "c"] {
        app.node_variable("app-wf", "llm", name, json!({"big": name}))
            .await;
    }
    app.node_variable("app-nodraft", "llm", "elsewhere", json!(1))
        .await;

    let (status, body) = app
        .send(
            Method::GET,
            &format!("{}?page=2&limit=2", variables_uri("app-wf")),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "c");
    assert_eq!(items[0]["type"], "node");
    assert_eq!(items[0]["selector"], json!(["llm", "c"]));
    assert!(items[0].get("value").is_none());
}

#[tokio::test]
async fn test_pagination_bounds() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send(
            Method::GET,
            &format!("{}?limit=101", variables_uri("app-wf")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app
        .send(
            Method::GET,
            &format!("{}?page=0", variables_uri("app-wf")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = app
        .send(
            Method::GET,
            &format!("{}?page=abc", variables_uri("app-wf")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_param");
}

#[tokio::test]
async fn test_delete_node_then_list_is_empty() {
    let app = TestApp::new().await;
    app.node_variable("app-wf", "llm", "text", json!("hi")).await;
    app.node_variable("app-wf", "llm", "usage", json!(3)).await;
    app.node_variable("app-wf", "start", "query", json!("q")).await;

    let (status, _) = app
        .send(Method::DELETE, &draft_uri("app-wf", "nodes/llm/variables"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .send(Method::GET, &draft_uri("app-wf", "nodes/llm/variables"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));

    let (_, body) = app.send(Method::GET, &variables_uri("app-wf"), None).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_node_listing_includes_values() {
    let app = TestApp::new().await;
    app.node_variable("app-wf", "llm", "text", json!("hello"))
        .await;

    let (status, body) = app
        .send(Method::GET, &draft_uri("app-wf", "nodes/llm/variables"), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["value"], "hello");
    assert_eq!(body["items"][0]["value_type"], "string");
}

#[tokio::test]
async fn test_reserved_node_ids_are_invalid() {
    let app = TestApp::new().await;

    for node in ["sys", "conversation", "env"] {
        let uri = draft_uri("app-wf", &format!("nodes/{}/variables", node));

        let (status, body) = app.send(Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_param");
        assert!(body["error"]["message"].as_str().unwrap().contains(node));

        let (status, _) = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_conversation_counter_lifecycle() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::GET, &draft_uri("app-wf", "conversation-variables"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["type"], "conversation");
    assert_eq!(items[0]["selector"], json!(["conversation", "counter"]));
    assert_eq!(items[0]["value"], 0);
    assert_eq!(items[0]["edited"], false);
    let id = items[0]["id"].as_str().unwrap().to_string();
    let variable_uri = format!("{}/{}", variables_uri("app-wf"), id);

    let (status, body) = app
        .send(Method::PATCH, &variable_uri, Some(json!({"value": 5})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], 5);
    assert_eq!(body["edited"], true);

    let (status, body) = app
        .send(Method::PUT, &format!("{}/reset", variable_uri), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], 0);
    assert_eq!(body["edited"], false);

    // Prefill does not duplicate the row
    let (_, body) = app
        .send(Method::GET, &draft_uri("app-wf", "conversation-variables"), None)
        .await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_conversation_variables_require_draft() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::GET,
            &draft_uri("app-nodraft", "conversation-variables"),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "draft_workflow_not_exist");
}

#[tokio::test]
async fn test_reset_of_undeclared_variable_returns_no_content() {
    let app = TestApp::new().await;
    let id = app
        .insert(DraftVariable::new_conversation_variable(
            AppId::from("app-wf"),
            "removed_from_workflow",
            Segment::infer(json!("x")),
            None,
        ))
        .await;
    let variable_uri = format!("{}/{}", variables_uri("app-wf"), id);

    let (status, body) = app
        .send(Method::PUT, &format!("{}/reset", variable_uri), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = app.send(Method::GET, &variable_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reset_of_node_variable_is_invalid() {
    let app = TestApp::new().await;
    let id = app.node_variable("app-wf", "llm", "text", json!("t")).await;

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("{}/{}/reset", variables_uri("app-wf"), id),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_param");
}

#[tokio::test]
async fn test_variable_of_other_app_is_not_found() {
    let app = TestApp::new().await;
    let id = app.node_variable("app-wf", "llm", "text", json!("t")).await;
    let foreign_uri = format!("{}/{}", variables_uri("app-nodraft"), id);

    let (status, body) = app.send(Method::GET, &foreign_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert!(body["error"]["message"].as_str().unwrap().contains(&id));

    let (status, _) = app.send(Method::DELETE, &foreign_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::GET,
            &format!("{}/{}", variables_uri("app-wf"), id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_patch_validation() {
    let app = TestApp::new().await;
    let id = app.node_variable("app-wf", "llm", "count", json!(1)).await;
    let uri = format!("{}/{}", variables_uri("app-wf"), id);

    let (status, _) = app
        .send(Method::PATCH, &uri, Some(json!({"visible": false})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(Method::PATCH, &uri, Some(json!({"value": "one"})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, body) = app.send(Method::PATCH, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["edited"], false);
    assert_eq!(body["value"], 1);

    let (status, body) = app
        .send(Method::PATCH, &uri, Some(json!({"name": "total"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selector"], json!(["llm", "total"]));
}

#[tokio::test]
async fn test_patch_with_null_fields_leaves_variable_unchanged() {
    let app = TestApp::new().await;
    let id = app.node_variable("app-wf", "llm", "count", json!(1)).await;
    let uri = format!("{}/{}", variables_uri("app-wf"), id);

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(json!({"name": null, "value": null})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], 1);
    assert_eq!(body["name"], "count");
    assert_eq!(body["edited"], false);

    let (status, body) = app
        .send(Method::PATCH, &uri, Some(json!({"value": null})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], 1);
    assert_eq!(body["edited"], false);
}

#[tokio::test]
async fn test_delete_variable_and_all() {
    let app = TestApp::new().await;
    let id = app.node_variable("app-wf", "llm", "a", json!(1)).await;
    app.node_variable("app-wf", "llm", "b", json!(2)).await;

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("{}/{}", variables_uri("app-wf"), id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app.send(Method::GET, &variables_uri("app-wf"), None).await;
    assert_eq!(body["total"], 1);

    let (status, _) = app.send(Method::DELETE, &variables_uri("app-wf"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app.send(Method::GET, &variables_uri("app-wf"), None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_system_variables() {
    let app = TestApp::new().await;
    app.insert(DraftVariable::new(
        AppId::from("app-wf"),
        VariableScope::System,
        "query",
        Segment::infer(json!("hello")),
    ))
    .await;

    let (status, body) = app
        .send(Method::GET, &draft_uri("app-wf", "system-variables"), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["type"], "sys");
    assert_eq!(body["items"][0]["selector"], json!(["sys", "query"]));
    assert_eq!(body["items"][0]["value"], "hello");
}

#[tokio::test]
async fn test_environment_variables_are_synthesized() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::GET, &draft_uri("app-wf", "environment-variables"), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let item = &body["items"][0];
    assert_eq!(item["id"], "env-1");
    assert_eq!(item["type"], "env");
    assert_eq!(item["selector"], json!(["env", "api_url"]));
    assert_eq!(item["value"], "https://example.com");
    assert_eq!(item["edited"], false);
    assert_eq!(item["visible"], true);
    assert_eq!(item["editable"], true);
}

#[tokio::test]
async fn test_guard_failures() {
    let app = TestApp::new().await;
    let uri = variables_uri("app-wf");

    let (status, body) = app.send_as(None, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["message"], "Forbidden");

    let viewer = app.viewer_token.clone();
    let (status, _) = app.send_as(Some(&viewer), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send_as(Some("garbage"), Method::GET, &uri, None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(Method::GET, &variables_uri("app-chat"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(Method::GET, &variables_uri("app-foreign"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]["message"].as_str().unwrap().contains("app-foreign"));

    let (status, _) = app.send(Method::GET, &variables_uri("app-missing"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_incomplete_setup_is_forbidden() {
    let seed = SEED.replacen('{', r#"{"setup_complete": false,"#, 1);
    let app = TestApp::with_seed(&seed).await;

    let (status, _) = app.send(Method::GET, &variables_uri("app-wf"), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new().await;

    let (status, body) = app.send_as(None, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.send_as(None, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"][0]["name"], "store");
}
