//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use regex::Regex;

use super::config::MetricsConfig;

const MAX_PATH_LABEL_LEN: usize = 100;

static UUID_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("uuid pattern is valid")
});

static NUMERIC_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\d+(/|$)").expect("numeric pattern is valid"));

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("draft_variable_api_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Count conversation variables materialized from workflow defaults
pub fn record_draft_variables_prefilled(count: usize) {
    if count > 0 {
        counter!("draft_variables_prefilled_total").increment(count as u64);
    }
}

/// Count draft variables removed, labelled by what triggered the delete
pub fn record_draft_variables_deleted(reason: &'static str, count: u64) {
    if count > 0 {
        counter!("draft_variables_deleted_total", "reason" => reason).increment(count);
    }
}

/// Sanitize URL path for metric labels (remove IDs, limit cardinality)
fn sanitize_path(path: &str) -> String {
    let path = UUID_SEGMENT.replace_all(path, "{id}");
    let path = NUMERIC_SEGMENT.replace_all(&path, "/{id}$1");

    if path.len() > MAX_PATH_LABEL_LEN {
        path.chars().take(MAX_PATH_LABEL_LEN).collect()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path_uuid() {
        let path = "/console/api/apps/550e8400-e29b-41d4-a716-446655440000/workflows/draft/variables";
        let sanitized = sanitize_path(path);
        assert_eq!(sanitized, "/console/api/apps/{id}/workflows/draft/variables");
    }

    #[test]
    fn test_sanitize_path_matched_route_untouched() {
        let path = "/console/api/apps/{app_id}/workflows/draft/variables/{variable_id}/reset";
        assert_eq!(sanitize_path(path), path);
    }

    #[test]
    fn test_sanitize_path_numeric_id() {
        let path = "/api/users/123/orders";
        let sanitized = sanitize_path(path);
        assert_eq!(sanitized, "/api/users/{id}/orders");
    }

    #[test]
    fn test_sanitize_path_truncates_long_paths() {
        let path = "/x".repeat(80);
        let sanitized = sanitize_path(&path);
        assert_eq!(sanitized.len(), MAX_PATH_LABEL_LEN);
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_draft_variables_prefilled(3);
        record_draft_variables_deleted("node", 2);
        record_http_request("GET", "/health", 200, Duration::from_millis(5));
    }
}
