//! User management controller.

use crate::{
    extractors::{JsonBody, RequestContext},
    responses::{created, ok, ApiResponse, ApiResult, AppError},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use orderly_core::{ErrorResponse, UserId};
use orderly_service::{CreateUserRequest, CreateUserResponse, UserResponse, UserService};
use std::sync::Arc;
use tracing::debug;

/// Creates the user router.
pub fn router(user_service: Arc<dyn UserService>) -> Router {
    Router::new()
        .route("/v1/users", post(create_user))
        .route("/v1/users/:id", get(get_user))
        .with_state(user_service)
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Invalid email or password", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(service): State<Arc<dyn UserService>>,
    request: RequestContext,
    JsonBody(body): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreateUserResponse>>), AppError> {
    debug!("Create user request: {}", body.email);

    let id = service
        .create_user(&request.ctx, body)
        .await
        .map_err(|e| request.reject(e))?;

    Ok(created(CreateUserResponse { id }))
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(service): State<Arc<dyn UserService>>,
    request: RequestContext,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", id);

    let user_id: UserId = id.parse().map_err(|e| request.reject(e))?;
    let user = service
        .get_user(&request.ctx, user_id)
        .await
        .map_err(|e| request.reject(e))?;

    ok(user)
}
