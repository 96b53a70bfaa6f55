//! User directory used by the order service to resolve owners.
//!
//! The directory is the user service as seen from the order service. It may
//! live in the same process ([`LocalUserDirectory`]) or behind HTTP
//! (`orderly-client`).

use crate::user_service::UserService;
use async_trait::async_trait;
use orderly_core::{CallContext, OrderlyError, OrderlyResult, Subject, UserId};
use std::sync::Arc;

/// Resolves user ids to canonical users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Looks up a user.
    ///
    /// Fails with `NotFound` when the user does not exist, `Cancelled` when
    /// `ctx` ends first, and any other variant when the directory itself is
    /// unavailable.
    async fn get_user(&self, ctx: &CallContext, id: UserId) -> OrderlyResult<Subject>;
}

/// Directory backed by a user service in the same process.
pub struct LocalUserDirectory {
    users: Arc<dyn UserService>,
}

impl LocalUserDirectory {
    /// Wraps an in-process user service.
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserDirectory for LocalUserDirectory {
    async fn get_user(&self, ctx: &CallContext, id: UserId) -> OrderlyResult<Subject> {
        self.users
            .get_user(ctx, id)
            .await
            .map(Subject::from)
            .map_err(|e| match e {
                OrderlyError::NotFound { .. } => OrderlyError::not_found("User", id),
                other => other,
            })
    }
}
