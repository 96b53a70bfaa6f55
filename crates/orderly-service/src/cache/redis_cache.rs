//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool, PoolConfig, Runtime};
use orderly_config::RedisConfig;
use orderly_core::{HealthCheck, HealthStatus, OrderlyError, OrderlyResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Redis-based cache service backed by a shared connection pool.
#[derive(Clone)]
pub struct RedisCacheService {
    pool: Arc<Pool>,
}

impl RedisCacheService {
    /// Create a new Redis cache service over an existing pool.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    /// Build a pool from configuration.
    ///
    /// Connections are opened lazily, so an unreachable Redis does not
    /// prevent startup; reads simply miss until it comes back.
    pub fn connect(config: &RedisConfig) -> OrderlyResult<Self> {
        let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
        redis_cfg.pool = Some(PoolConfig::new(config.pool_size as usize));

        let pool = redis_cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| OrderlyError::Cache(format!("Failed to create Redis pool: {e}")))?;

        info!("Redis cache pool created for {}", config.url);
        Ok(Self::new(Arc::new(pool)))
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> OrderlyResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| OrderlyError::Cache(format!("Failed to get Redis connection: {e}")))
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn get_raw(&self, key: &str) -> OrderlyResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| OrderlyError::Cache(format!("Failed to get key '{key}': {e}")))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> OrderlyResult<()> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| OrderlyError::Cache(format!("Failed to set key '{key}': {e}")))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> OrderlyResult<bool> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| OrderlyError::Cache(format!("Failed to delete key '{key}': {e}")))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }
}

#[async_trait]
impl HealthCheck for RedisCacheService {
    fn name(&self) -> &str {
        "cache"
    }

    fn is_critical(&self) -> bool {
        false
    }

    async fn check(&self) -> HealthStatus {
        let mut conn = match self.get_conn().await {
            Ok(conn) => conn,
            Err(e) => return HealthStatus::Degraded(e.to_string()),
        };

        let pong: Result<String, _> = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await;

        match pong {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(format!("PING failed: {e}")),
        }
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisCacheService")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}
