//! Cache adapters for provider payloads.
//!
//! - `redis_cache` - shared cache used in deployments
//! - `memory` - in-process cache for tests and single-node runs

mod memory;
mod redis_cache;

use std::time::Duration;

use async_trait::async_trait;
use ratediff_types::{CacheError, RateCache};

pub use self::memory::MemoryCache;
pub use self::redis_cache::RedisCache;

/// URL selecting the in-process cache instead of Redis.
pub const MEMORY_CACHE_URL: &str = "memory://";

/// Unified cache wrapper; the backend is picked from the cache URL scheme.
pub enum Cache {
    Redis(RedisCache),
    Memory(MemoryCache),
}

/// Build a cache from a connection URL.
///
/// `redis://` and `rediss://` connect to Redis; `memory://` keeps entries in
/// process.
pub async fn build_cache(cache_url: &str) -> anyhow::Result<Cache> {
    if cache_url.starts_with(MEMORY_CACHE_URL) {
        tracing::info!("Using in-memory cache");
        return Ok(Cache::Memory(MemoryCache::new()));
    }

    if cache_url.starts_with("redis://") || cache_url.starts_with("rediss://") {
        let cache = RedisCache::connect(cache_url).await?;
        return Ok(Cache::Redis(cache));
    }

    anyhow::bail!("Unsupported cache URL: {}", cache_url)
}

#[async_trait]
impl RateCache for Cache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self {
            Cache::Redis(cache) => cache.get(key).await,
            Cache::Memory(cache) => cache.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        match self {
            Cache::Redis(cache) => cache.set(key, value, ttl).await,
            Cache::Memory(cache) => cache.set(key, value, ttl).await,
        }
    }
}
