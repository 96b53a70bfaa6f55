//! Cache-aside policy shared by the services.
//!
//! The store is the source of truth. The cache only ever holds a snapshot the
//! store returned, and every cache failure degrades to a miss. Only
//! cancellation escapes these helpers.

use super::{CacheInterface, CACHE_TTL};
use orderly_core::{CallContext, OrderlyResult};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

/// Looks up `key`, decoding the stored snapshot.
///
/// A value that fails to decode, or that `is_valid` rejects, is deleted and
/// reported as a miss so the next read repopulates it from the store.
pub async fn read<T, F>(
    cache: &dyn CacheInterface,
    ctx: &CallContext,
    key: &str,
    entity: &'static str,
    is_valid: F,
) -> OrderlyResult<Option<T>>
where
    T: DeserializeOwned,
    F: FnOnce(&T) -> bool,
{
    let raw = match ctx.run(cache.get_raw(key)).await {
        Ok(raw) => raw,
        Err(e) if e.is_cancelled() => return Err(e),
        Err(e) => {
            warn!("Cache read for '{}' failed, falling back to store: {}", key, e);
            record_error("get");
            record_outcome(entity, "error");
            return Ok(None);
        }
    };

    let Some(raw) = raw else {
        record_outcome(entity, "miss");
        return Ok(None);
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(value) if is_valid(&value) => {
            record_outcome(entity, "hit");
            Ok(Some(value))
        }
        Ok(_) => {
            warn!("Cached snapshot for '{}' does not match its key, discarding", key);
            record_outcome(entity, "corrupt");
            invalidate(cache, ctx, key).await;
            Ok(None)
        }
        Err(e) => {
            warn!("Cached snapshot for '{}' is undecodable, discarding: {}", key, e);
            record_outcome(entity, "corrupt");
            invalidate(cache, ctx, key).await;
            Ok(None)
        }
    }
}

/// Stores `value` under `key` with the fixed TTL.
///
/// Best effort: failures are logged and dropped. Nothing is written once the
/// request is cancelled, even though the store write that produced `value`
/// already succeeded.
pub async fn populate<T: Serialize>(
    cache: &dyn CacheInterface,
    ctx: &CallContext,
    key: &str,
    value: &T,
) {
    if ctx.is_done() {
        debug!("Request finished before caching '{}', skipping", key);
        return;
    }

    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Failed to encode snapshot for '{}': {}", key, e);
            record_error("encode");
            return;
        }
    };

    if let Err(e) = ctx.run(cache.set_raw(key, &raw, CACHE_TTL)).await {
        if !e.is_cancelled() {
            warn!("Failed to cache '{}': {}", key, e);
            record_error("set");
        }
    }
}

/// Removes `key`. Best effort, like [`populate`].
pub async fn invalidate(cache: &dyn CacheInterface, ctx: &CallContext, key: &str) {
    if ctx.is_done() {
        return;
    }

    if let Err(e) = ctx.run(cache.delete(key)).await {
        if !e.is_cancelled() {
            warn!("Failed to invalidate '{}': {}", key, e);
            record_error("delete");
        }
    }
}

fn record_outcome(entity: &'static str, outcome: &'static str) {
    metrics::counter!(
        "orderly_cache_requests_total",
        "entity" => entity,
        "outcome" => outcome
    )
    .increment(1);
}

fn record_error(op: &'static str) {
    metrics::counter!("orderly_cache_errors_total", "op" => op).increment(1);
}
