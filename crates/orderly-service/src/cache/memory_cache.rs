//! In-process cache used when Redis is disabled.

use super::CacheInterface;
use async_trait::async_trait;
use moka::{future::Cache, Expiry};
use orderly_core::{HealthCheck, HealthStatus, OrderlyResult};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct EntryTtl;

impl Expiry<String, Entry> for EntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// TTL cache backed by `moka`.
///
/// Entries leave only by expiry or deletion; there is no size-based
/// eviction. Expired entries are reclaimed by moka's housekeeping whether or
/// not the key is ever read again.
#[derive(Clone)]
pub struct MemoryCache {
    entries: Cache<String, Entry>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        let entries = Cache::builder().expire_after(EntryTtl).build();
        Self { entries }
    }

    /// Number of live entries, after pending evictions are applied.
    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    /// Returns true when no live entry remains.
    pub async fn is_empty(&self) -> bool {
        self.entry_count().await == 0
    }

    /// The TTL `key` was last written with, if it is still live.
    pub async fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.entries.get(key).await.map(|entry| entry.ttl)
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entry_count", &self.entries.entry_count())
            .finish()
    }
}

#[async_trait]
impl CacheInterface for MemoryCache {
    async fn get_raw(&self, key: &str) -> OrderlyResult<Option<String>> {
        Ok(self.entries.get(key).await.map(|entry| entry.value))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> OrderlyResult<()> {
        self.entries
            .insert(
                key.to_string(),
                Entry {
                    value: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> OrderlyResult<bool> {
        Ok(self.entries.remove(key).await.is_some())
    }
}

#[async_trait]
impl HealthCheck for MemoryCache {
    fn name(&self) -> &str {
        "cache"
    }

    fn is_critical(&self) -> bool {
        false
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}
