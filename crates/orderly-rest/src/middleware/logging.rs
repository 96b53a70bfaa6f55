//! Request logging middleware.

use crate::{extractors::request_id, responses::AppError};
use axum::{
    body::{to_bytes, Body, Bytes, HttpBody},
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use orderly_core::OrderlyError;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};

/// Largest request body buffered for debug logging. Larger bodies, and
/// bodies of unknown length, pass through unlogged.
const MAX_LOGGED_BODY: usize = 64 * 1024;

/// Fields whose values never reach the logs.
const REDACTED_FIELDS: &[&str] = &["password"];

/// Logging options for [`logging_middleware`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingConfig {
    /// Log request bodies at debug level.
    pub log_request_bodies: bool,
}

/// Request logging middleware.
pub async fn logging_middleware(
    State(config): State<LoggingConfig>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let request = if config.log_request_bodies {
        match log_body(request).await {
            Ok(request) => request,
            Err(response) => return response,
        }
    } else {
        request
    };

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        target: "http",
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "HTTP request completed"
    );

    response
}

/// Buffers the body, logs it with secrets masked, and rebuilds the request.
async fn log_body(request: Request) -> Result<Request, Response> {
    let within_limit = request
        .body()
        .size_hint()
        .upper()
        .is_some_and(|len| len <= MAX_LOGGED_BODY as u64);
    if !within_limit {
        debug!(
            target: "http",
            method = %request.method(),
            uri = %request.uri(),
            "HTTP request body not logged: too large or unknown length"
        );
        return Ok(request);
    }

    let request_id = request_id(request.headers());
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_LOGGED_BODY).await.map_err(|e| {
        AppError::from(OrderlyError::invalid_argument(format!(
            "Unreadable request body: {e}"
        )))
        .with_request_id(request_id)
        .into_response()
    })?;

    if !bytes.is_empty() {
        debug!(
            target: "http",
            method = %parts.method,
            uri = %parts.uri,
            body = %redact(&bytes),
            "HTTP request body"
        );
    }

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

fn redact(bytes: &Bytes) -> String {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(mut fields)) => {
            for name in REDACTED_FIELDS {
                if let Some(value) = fields.get_mut(*name) {
                    *value = Value::String("[REDACTED]".to_string());
                }
            }
            Value::Object(fields).to_string()
        }
        Ok(other) => other.to_string(),
        Err(_) => format!("<{} non-JSON bytes>", bytes.len()),
    }
}
