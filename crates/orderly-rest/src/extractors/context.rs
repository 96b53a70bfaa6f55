//! Per-request call context extractor.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use orderly_core::{CallContext, OrderlyError};
use std::time::Duration;

/// Header through which a client may ask for a shorter deadline.
pub const REQUEST_TIMEOUT_HEADER: &str = "x-request-timeout-ms";

/// Header carrying the request ID assigned at the edge.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Server-wide upper bound on request duration, installed as an extension.
#[derive(Debug, Clone, Copy)]
pub struct RequestTimeout(pub Duration);

impl Default for RequestTimeout {
    fn default() -> Self {
        Self(Duration::from_secs(30))
    }
}

/// Cancellation context and correlation ID for one request.
///
/// The deadline is the server timeout, shortened by the
/// `x-request-timeout-ms` header when the client sends one. Dropping the
/// handler future on client disconnect drops every call made under it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub ctx: CallContext,
    pub request_id: Option<String>,
}

/// Reads the request ID assigned at the edge.
pub fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

impl RequestContext {
    /// Wraps a service error for the response, tagging it with the request ID.
    pub fn reject(&self, error: OrderlyError) -> AppError {
        AppError::from(error).with_request_id(self.request_id.clone())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = request_id(&parts.headers);

        let server_timeout = parts
            .extensions
            .get::<RequestTimeout>()
            .copied()
            .unwrap_or_default()
            .0;

        let timeout = match parts.headers.get(REQUEST_TIMEOUT_HEADER) {
            Some(value) => {
                let millis = value
                    .to_str()
                    .ok()
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .ok_or_else(|| {
                        AppError::from(OrderlyError::invalid_argument(format!(
                            "{REQUEST_TIMEOUT_HEADER} must be a whole number of milliseconds"
                        )))
                        .with_request_id(request_id.clone())
                    })?;
                server_timeout.min(Duration::from_millis(millis))
            }
            None => server_timeout,
        };

        Ok(Self {
            ctx: CallContext::with_timeout(timeout),
            request_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<RequestContext, AppError> {
        let (mut parts, ()) = request.into_parts();
        RequestContext::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test(start_paused = true)]
    async fn test_header_can_only_shorten_timeout() {
        let request = Request::builder()
            .header(REQUEST_TIMEOUT_HEADER, "500")
            .extension(RequestTimeout(Duration::from_secs(10)))
            .body(())
            .unwrap();
        let shorter = extract(request).await.unwrap();

        let request = Request::builder()
            .header(REQUEST_TIMEOUT_HEADER, "60000")
            .extension(RequestTimeout(Duration::from_secs(10)))
            .body(())
            .unwrap();
        let capped = extract(request).await.unwrap();

        let now = tokio::time::Instant::now();
        assert_eq!(shorter.ctx.deadline(), Some(now + Duration::from_millis(500)));
        assert_eq!(capped.ctx.deadline(), Some(now + Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn test_malformed_timeout_is_invalid_argument() {
        let request = Request::builder()
            .header(REQUEST_TIMEOUT_HEADER, "soon")
            .header(REQUEST_ID_HEADER, "abc")
            .body(())
            .unwrap();

        let err = extract(request).await.unwrap_err();
        assert!(matches!(err.error, OrderlyError::InvalidArgument(_)));
        assert_eq!(err.request_id.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_request_id_is_captured() {
        let request = Request::builder()
            .header(REQUEST_ID_HEADER, "req-42")
            .body(())
            .unwrap();

        let context = extract(request).await.unwrap();
        assert_eq!(context.request_id.as_deref(), Some("req-42"));
        assert!(context.ctx.deadline().is_some());
    }
}
