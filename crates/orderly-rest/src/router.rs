//! Main application router.

use crate::{
    controllers::{health_controller, metrics_controller, order_controller, user_controller},
    extractors::RequestTimeout,
    middleware::{handle_panic, logging_middleware, panic_request_id, LoggingConfig},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{middleware, routing::get, Extension, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use orderly_config::{ObservabilityConfig, ServerConfig};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
///
/// Routes for a service are mounted only when `state` carries it. The
/// Prometheus endpoint is mounted when a recorder handle is given.
pub fn create_router(
    state: AppState,
    server_config: &ServerConfig,
    observability: &ObservabilityConfig,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let mut router = Router::new()
        .merge(health_controller::router(state.health_checks))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root));

    if let Some(user_service) = state.user_service {
        router = router.merge(user_controller::router(user_service));
    }
    if let Some(order_service) = state.order_service {
        router = router.merge(order_controller::router(order_service));
    }
    if let Some(handle) = metrics {
        router = router.merge(metrics_controller::router(&observability.metrics_path, handle));
    }

    let logging = LoggingConfig {
        log_request_bodies: observability.log_request_bodies,
    };

    // Request IDs wrap the panic guard so recovered panics carry one too.
    let router = router
        .layer(middleware::from_fn_with_state(logging, logging_middleware))
        .layer(Extension(RequestTimeout(server_config.request_timeout())))
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(panic_request_id))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    }
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Orderly API v1"
}
