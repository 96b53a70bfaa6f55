//! Store traits.
//!
//! Each method is a single atomic statement. Absence is reported as `None`
//! rather than an error; the services decide what a missing row means.

use async_trait::async_trait;
use orderly_core::{NewOrder, Order, OrderlyResult, User, UserId};

/// Durable storage of users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. A duplicate email fails with
    /// [`OrderlyError::AlreadyExists`](orderly_core::OrderlyError::AlreadyExists).
    async fn create_user(&self, email: &str, password_hash: &str) -> OrderlyResult<User>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> OrderlyResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> OrderlyResult<Option<User>>;
}

/// Durable storage of orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts an order.
    async fn create_order(&self, order: &NewOrder) -> OrderlyResult<Order>;
}
