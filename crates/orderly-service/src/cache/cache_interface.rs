//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use orderly_core::OrderlyResult;
use std::time::Duration;

/// Fixed-TTL key/value store holding serialized entity snapshots.
///
/// Every method may fail with [`OrderlyError::Cache`](orderly_core::OrderlyError::Cache).
/// Callers treat such a failure exactly like a miss and never pass it on.
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> OrderlyResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> OrderlyResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> OrderlyResult<bool>;
}
