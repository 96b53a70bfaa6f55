//! Per-request cancellation and deadline propagation.
//!
//! Every suspending collaborator call (cache, store, directory) is driven
//! through [`CallContext::run`], so a caller that gives up, or a deadline that
//! passes, drops the outstanding I/O instead of leaking it.

use crate::{OrderlyError, OrderlyResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation signal and optional deadline for one inbound request.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context that is never cancelled and has no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().narrowed(timeout)
    }

    /// A child context that is cancelled with its parent and whose deadline
    /// is the earlier of the parent's and `timeout` from now.
    #[must_use]
    pub fn narrowed(&self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        let deadline = match self.deadline {
            Some(current) if current <= candidate => current,
            _ => candidate,
        };
        Self {
            token: self.token.child_token(),
            deadline: Some(deadline),
        }
    }

    /// Cancels this context and every context derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true once the context was cancelled or its deadline passed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fails with [`OrderlyError::Cancelled`] once the context is done.
    pub fn check(&self) -> OrderlyResult<()> {
        if self.token.is_cancelled() {
            return Err(OrderlyError::cancelled("request cancelled"));
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(OrderlyError::cancelled("deadline exceeded"));
        }
        Ok(())
    }

    /// Drives `operation` until it completes, the context is cancelled, or
    /// the deadline passes. In the last two cases `operation` is dropped.
    pub async fn run<F, T>(&self, operation: F) -> OrderlyResult<T>
    where
        F: Future<Output = OrderlyResult<T>>,
    {
        self.check()?;

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(OrderlyError::cancelled("request cancelled")),
            () = expired => Err(OrderlyError::cancelled("deadline exceeded")),
            result = operation => result,
        }
    }
}
