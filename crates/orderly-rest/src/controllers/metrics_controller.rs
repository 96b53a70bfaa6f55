//! Prometheus scrape endpoint.

use axum::{extract::State, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;

/// Creates the metrics router serving the recorder's text exposition.
pub fn router(path: &str, handle: PrometheusHandle) -> Router {
    Router::new()
        .route(path, get(render_metrics))
        .with_state(handle)
}

async fn render_metrics(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}
