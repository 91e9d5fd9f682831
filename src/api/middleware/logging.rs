//! Request logging for the console API

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

const CONSOLE_APPS_PREFIX: &str = "/console/api/apps/";

/// Headers worth a log line; credentials are never among them
const LOGGED_HEADERS: &[&str] = &["content-type", "content-length", "user-agent", "x-forwarded-for"];

/// Log each request and its outcome, tagged with the console app it targets.
/// Spans come from `TraceLayer`; this middleware only emits events.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = extract_path(&request);
    let app_id = console_app_id(request.uri().path()).unwrap_or("-").to_string();
    let request_id = extract_request_id(request.headers());
    let authenticated = request.headers().contains_key("authorization");

    info!(
        method = %method,
        path = %path,
        app_id = %app_id,
        request_id = %request_id,
        authenticated,
        headers = %logged_headers(request.headers()),
        "Incoming request"
    );

    let response = next.run(request).await;
    let status = response.status();
    let duration_ms = start.elapsed().as_millis();

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            app_id = %app_id,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            app_id = %app_id,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Request completed"
        );
    }

    response
}

/// Route template when matched, so ids never end up in logs or labels
pub(crate) fn extract_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

/// The `{app_id}` segment of a console app route
fn console_app_id(path: &str) -> Option<&str> {
    path.strip_prefix(CONSOLE_APPS_PREFIX)?
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

fn extract_request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

fn logged_headers(headers: &HeaderMap) -> String {
    LOGGED_HEADERS
        .iter()
        .filter_map(|name| {
            headers
                .get(*name)
                .map(|value| format!("{}={}", name, value.to_str().unwrap_or("[invalid]")))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
