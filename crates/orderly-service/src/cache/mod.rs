//! Caching infrastructure for the service layer.
//!
//! The cache is a disposable accelerator in front of the store. Backends
//! implement [`CacheInterface`]; the read/populate/invalidate policy the
//! services follow lives in [`cache_aside`].

pub mod cache_aside;
mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::CacheInterface;
pub use cache_keys::CACHE_TTL;
pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCacheService;
