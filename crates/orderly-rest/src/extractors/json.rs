//! JSON body extractor with taxonomy-shaped rejections.

use super::request_id;
use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use orderly_core::OrderlyError;
use serde::de::DeserializeOwned;

/// JSON extractor whose rejection is an `INVALID_ARGUMENT` error body
/// instead of Axum's plain-text response.
///
/// Field validation stays in the services; this only guarantees the body
/// parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let request_id = request_id(req.headers());
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::from(OrderlyError::invalid_argument(format!(
                    "Invalid JSON: {}",
                    rejection.body_text()
                )))
                .with_request_id(request_id)
            })?;

        Ok(Self(value))
    }
}
