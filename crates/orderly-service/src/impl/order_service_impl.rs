//! Order service implementation.

use crate::cache::{cache_aside, cache_keys, CacheInterface};
use crate::directory::UserDirectory;
use crate::dto::{CreateOrderRequest, OrderResponse};
use crate::order_service::OrderService;
use async_trait::async_trait;
use orderly_core::{CallContext, NewOrder, OrderlyError, OrderlyResult, Subject, UserId, ValidateExt};
use orderly_repository::OrderRepository;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Order service over a store, a cache, and the user directory.
pub struct OrderServiceImpl {
    order_repository: Arc<dyn OrderRepository>,
    cache: Arc<dyn CacheInterface>,
    directory: Arc<dyn UserDirectory>,
}

impl OrderServiceImpl {
    /// Creates a new order service.
    pub fn new(
        order_repository: Arc<dyn OrderRepository>,
        cache: Arc<dyn CacheInterface>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            order_repository,
            cache,
            directory,
        }
    }

    /// Resolves the owner, mapping directory failures onto the order taxonomy.
    async fn resolve_owner(&self, ctx: &CallContext, user_id: UserId) -> OrderlyResult<Subject> {
        match ctx.run(self.directory.get_user(ctx, user_id)).await {
            Ok(subject) => Ok(subject),
            Err(OrderlyError::NotFound { .. }) => Err(OrderlyError::UserNotFound {
                user_id: user_id.get(),
            }),
            Err(e) if e.is_cancelled() => Err(e),
            Err(e) => {
                warn!("Directory lookup for user {} failed: {}", user_id, e);
                Err(OrderlyError::internal(format!(
                    "user directory unavailable: {e}"
                )))
            }
        }
    }
}

#[async_trait]
impl OrderService for OrderServiceImpl {
    #[instrument(skip_all, fields(user_id = %request.user_id))]
    async fn create_order(&self, ctx: &CallContext, request: CreateOrderRequest) -> OrderlyResult<OrderResponse> {
        debug!("Creating order for user {}: {} x{}", request.user_id, request.product, request.quantity);

        request.validate_request()?;
        let user_id = request.user_id.ensure_positive()?;

        let owner = self.resolve_owner(ctx, user_id).await?;
        if owner.id != user_id {
            debug!("Directory canonicalized user {} to {}", user_id, owner.id);
        }

        let new_order = NewOrder {
            user_id: owner.id,
            product: request.product,
            quantity: request.quantity,
        };
        let order = ctx
            .run(self.order_repository.create_order(&new_order))
            .await
            .map_err(OrderlyError::surface)?;

        let response = OrderResponse::from(order);
        cache_aside::populate(
            self.cache.as_ref(),
            ctx,
            &cache_keys::order(response.id),
            &response,
        )
        .await;

        info!("Order created: {} for user {}", response.id, response.user_id);
        Ok(response)
    }
}
