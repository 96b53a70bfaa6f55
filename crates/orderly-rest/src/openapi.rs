//! OpenAPI documentation configuration.

use crate::controllers::{CheckReport, HealthResponse, ReadinessResponse};
use orderly_core::{ErrorResponse, OrderId, UserId};
use orderly_service::{
    CreateOrderRequest, CreateUserRequest, CreateUserResponse, OrderResponse, UserResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Orderly API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Orderly API",
        version = "1.0.0",
        description = "User registration and order placement",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        // Order endpoints
        crate::controllers::order_controller::create_order,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
    ),
    components(
        schemas(
            UserId,
            OrderId,
            ErrorResponse,
            CreateUserRequest,
            CreateUserResponse,
            UserResponse,
            CreateOrderRequest,
            OrderResponse,
            HealthResponse,
            ReadinessResponse,
            CheckReport,
        )
    ),
    tags(
        (name = "users", description = "User registration and lookup"),
        (name = "orders", description = "Order placement"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
