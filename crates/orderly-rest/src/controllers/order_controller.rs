//! Order placement controller.

use crate::{
    extractors::{JsonBody, RequestContext},
    responses::{created, ApiResponse, AppError},
};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use orderly_core::ErrorResponse;
use orderly_service::{CreateOrderRequest, OrderResponse, OrderService};
use std::sync::Arc;
use tracing::debug;

/// Creates the order router.
pub fn router(order_service: Arc<dyn OrderService>) -> Router {
    Router::new()
        .route("/v1/orders", post(create_order))
        .with_state(order_service)
}

/// Place an order for a user.
#[utoipa::path(
    post,
    path = "/v1/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid product or quantity", body = ErrorResponse),
        (status = 404, description = "Owning user not found", body = ErrorResponse)
    )
)]
pub async fn create_order(
    State(service): State<Arc<dyn OrderService>>,
    request: RequestContext,
    JsonBody(body): JsonBody<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>), AppError> {
    debug!("Create order request for user {}", body.user_id);

    let order = service
        .create_order(&request.ctx, body)
        .await
        .map_err(|e| request.reject(e))?;

    Ok(created(order))
}
