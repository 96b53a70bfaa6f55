//! Dependency wiring.
//!
//! Components are constructed explicitly and passed by reference into the
//! services that use them. Nothing is looked up from process-wide state.

use orderly_client::create_http_user_directory;
use orderly_config::{DirectoryConfig, RedisConfig, ServiceSet};
use orderly_core::{HealthCheck, OrderlyError, OrderlyResult};
use orderly_repository::{DatabasePool, DatabasePoolInterface, PgOrderRepository, PgUserRepository};
use orderly_rest::AppState;
use orderly_security::PasswordHasher;
use orderly_service::{
    CacheInterface, LocalUserDirectory, MemoryCache, OrderService, OrderServiceImpl,
    RedisCacheService, UserDirectory, UserService, UserServiceImpl,
};
use std::sync::Arc;
use tracing::info;

/// A cache backend together with its health probe.
#[derive(Clone)]
pub struct CacheComponent {
    pub cache: Arc<dyn CacheInterface>,
    pub health: Arc<dyn HealthCheck>,
}

impl CacheComponent {
    /// Redis when enabled, otherwise the in-process TTL map.
    pub fn from_config(config: &RedisConfig) -> OrderlyResult<Self> {
        if config.enabled {
            let redis = Arc::new(RedisCacheService::connect(config)?);
            Ok(Self {
                cache: redis.clone(),
                health: redis,
            })
        } else {
            info!("Redis disabled, using in-memory cache");
            Ok(Self::memory())
        }
    }

    /// The in-process TTL map.
    #[must_use]
    pub fn memory() -> Self {
        let memory = Arc::new(MemoryCache::new());
        Self {
            cache: memory.clone(),
            health: memory,
        }
    }
}

/// Services resolved for this process.
pub struct AppModule {
    pub user_service: Option<Arc<dyn UserService>>,
    pub order_service: Option<Arc<dyn OrderService>>,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppModule {
    /// Converts the module into router state.
    #[must_use]
    pub fn into_state(self) -> AppState {
        AppState {
            user_service: self.user_service,
            order_service: self.order_service,
            health_checks: self.health_checks,
        }
    }
}

/// Builder for [`AppModule`].
pub struct AppModuleBuilder {
    services: ServiceSet,
    database_pool: Option<Arc<DatabasePool>>,
    cache: Option<CacheComponent>,
    password_hash_cost: u32,
    directory: DirectoryConfig,
}

impl AppModuleBuilder {
    /// Creates a builder for the given service set.
    #[must_use]
    pub fn new(services: ServiceSet) -> Self {
        Self {
            services,
            database_pool: None,
            cache: None,
            password_hash_cost: 2,
            directory: DirectoryConfig::default(),
        }
    }

    /// Sets the database pool.
    #[must_use]
    pub fn with_database_pool(mut self, pool: Arc<DatabasePool>) -> Self {
        self.database_pool = Some(pool);
        self
    }

    /// Sets the cache. Defaults to the in-memory cache.
    #[must_use]
    pub fn with_cache(mut self, cache: CacheComponent) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the password hash cost.
    #[must_use]
    pub const fn with_password_hash_cost(mut self, cost: u32) -> Self {
        self.password_hash_cost = cost;
        self
    }

    /// Sets where a standalone order service finds the user service.
    #[must_use]
    pub fn with_directory_config(mut self, config: DirectoryConfig) -> Self {
        self.directory = config;
        self
    }

    /// Builds the module.
    pub fn build(self) -> OrderlyResult<AppModule> {
        let database_pool = self.database_pool.ok_or_else(|| {
            OrderlyError::Configuration("Database pool is required".to_string())
        })?;
        let cache = self.cache.unwrap_or_else(CacheComponent::memory);

        let pool: Arc<dyn DatabasePoolInterface> = database_pool.clone();
        let health_checks: Vec<Arc<dyn HealthCheck>> = vec![database_pool, cache.health.clone()];

        let user_service: Option<Arc<dyn UserService>> = if self.services.has_user() {
            Some(Arc::new(UserServiceImpl::new(
                Arc::new(PgUserRepository::new(pool.clone())),
                cache.cache.clone(),
                Arc::new(PasswordHasher::with_cost(self.password_hash_cost)),
            )))
        } else {
            None
        };

        let order_service: Option<Arc<dyn OrderService>> = if self.services.has_order() {
            let directory: Arc<dyn UserDirectory> = match &user_service {
                Some(users) => {
                    info!("Order service resolves users in-process");
                    Arc::new(LocalUserDirectory::new(users.clone()))
                }
                None => {
                    info!("Order service resolves users via {}", self.directory.base_url);
                    create_http_user_directory(&self.directory)?
                }
            };
            Some(Arc::new(OrderServiceImpl::new(
                Arc::new(PgOrderRepository::new(pool)),
                cache.cache,
                directory,
            )))
        } else {
            None
        };

        Ok(AppModule {
            user_service,
            order_service,
            health_checks,
        })
    }
}
