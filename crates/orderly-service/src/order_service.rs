//! Order service trait definition.

use crate::dto::{CreateOrderRequest, OrderResponse};
use async_trait::async_trait;
use orderly_core::{CallContext, OrderlyResult};

/// Order service trait.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Places an order after resolving its owner through the directory.
    ///
    /// An owner the directory does not know fails with `UserNotFound` and
    /// never reaches the store.
    async fn create_order(&self, ctx: &CallContext, request: CreateOrderRequest) -> OrderlyResult<OrderResponse>;
}
