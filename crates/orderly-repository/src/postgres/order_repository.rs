//! Postgres order repository implementation.

use crate::{traits::OrderRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orderly_core::{NewOrder, Order, OrderId, OrderlyResult, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// Postgres order repository implementation.
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgOrderRepository {
    /// Creates a new Postgres order repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    product: String,
    quantity: i64,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            product: row.product,
            quantity: row.quantity,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create_order(&self, order: &NewOrder) -> OrderlyResult<Order> {
        debug!(
            "Inserting order for user {}: {} x{}",
            order.user_id, order.product, order.quantity
        );

        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (user_id, product, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, product, quantity, created_at
            ",
        )
        .bind(order.user_id.get())
        .bind(&order.product)
        .bind(order.quantity)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(row.into())
    }
}
