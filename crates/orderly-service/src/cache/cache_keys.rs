//! Cache key generators for consistent key naming.
//!
//! Keys are `"<entity>:<decimal id>"` with no namespace prefix so that other
//! processes sharing the Redis instance derive the same keys.

use orderly_core::{OrderId, UserId};
use std::time::Duration;

/// TTL of every cache entry (25 minutes).
pub const CACHE_TTL: Duration = Duration::from_secs(25 * 60);

/// Generate a cache key for a user by ID.
#[must_use]
pub fn user(id: UserId) -> String {
    format!("user:{id}")
}

/// Generate a cache key for an order by ID.
#[must_use]
pub fn order(id: OrderId) -> String {
    format!("order:{id}")
}
