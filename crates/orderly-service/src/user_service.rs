//! User service trait definition.

use crate::dto::{CreateUserRequest, UserResponse};
use async_trait::async_trait;
use orderly_core::{CallContext, OrderlyResult, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Registers a user and returns the id the store assigned.
    ///
    /// Fails with `InvalidArgument` on a malformed request and with
    /// `AlreadyExists` when the email is taken, including when a concurrent
    /// registration wins the race.
    async fn create_user(&self, ctx: &CallContext, request: CreateUserRequest) -> OrderlyResult<UserId>;

    /// Reads a user through the cache.
    async fn get_user(&self, ctx: &CallContext, id: UserId) -> OrderlyResult<UserResponse>;
}
