//! Health check controller.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use futures::future::join_all;
use orderly_core::HealthCheck;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Readiness report over every registered dependency.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    /// `ready` or `not_ready`.
    pub status: String,
    pub checks: Vec<CheckReport>,
}

/// Outcome of one dependency check.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckReport {
    pub name: String,
    pub status: String,
    pub critical: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Creates the health router.
pub fn router(checks: Vec<Arc<dyn HealthCheck>>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(Arc::new(checks))
}

/// Liveness endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Process is alive", body = HealthResponse)
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness endpoint. Only an unhealthy critical dependency makes the
/// process unready; a degraded cache does not.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "A critical dependency is down", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(
    State(checks): State<Arc<Vec<Arc<dyn HealthCheck>>>>,
) -> impl IntoResponse {
    let statuses = join_all(checks.iter().map(|check| check.check())).await;

    let mut ready = true;
    let reports: Vec<CheckReport> = checks
        .iter()
        .zip(statuses)
        .map(|(check, status)| {
            if check.is_critical() && status.is_unhealthy() {
                ready = false;
            }
            CheckReport {
                name: check.name().to_string(),
                status: status.label().to_string(),
                critical: check.is_critical(),
                detail: status.detail().map(ToString::to_string),
            }
        })
        .collect();

    let (code, status) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        code,
        Json(ReadinessResponse {
            status: status.to_string(),
            checks: reports,
        }),
    )
}
