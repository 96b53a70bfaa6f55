//! Panic guard turning a handler panic into a 500 response.

use crate::{extractors::request_id, responses::AppError};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use orderly_core::OrderlyError;
use std::any::Any;
use tracing::error;

/// Marks a response produced by [`handle_panic`].
#[derive(Debug, Clone, Copy)]
struct RecoveredPanic;

/// Response for a panicking handler, used with `CatchPanicLayer::custom`.
///
/// The panic message is logged but never sent to the client.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(ToString::to_string))
        .unwrap_or_else(|| "unknown panic payload".to_string());

    error!("Request handler panicked: {}", detail);

    panic_response(None)
}

/// Stamps the request ID onto the body of a recovered panic.
///
/// Must sit outside `CatchPanicLayer`, which has no access to the request.
pub async fn panic_request_id(request: Request, next: Next) -> Response {
    let request_id = request_id(request.headers());
    let response = next.run(request).await;

    if response.extensions().get::<RecoveredPanic>().is_some() && request_id.is_some() {
        return panic_response(request_id);
    }
    response
}

fn panic_response(request_id: Option<String>) -> Response {
    let mut response = AppError::from(OrderlyError::internal("internal server error"))
        .with_request_id(request_id)
        .into_response();
    response.extensions_mut().insert(RecoveredPanic);
    response
}
