use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;
use tracing::debug;

use ratediff_types::{CacheError, RateCache};

struct CacheValue {
    value: String,
    expires_at: Instant,
}

/// In-memory cache backed by a `DashMap`.
///
/// Expiry is checked lazily on read against the tokio clock, so paused-time
/// tests can step past a TTL with `tokio::time::advance`.
#[derive(Default)]
pub struct MemoryCache {
    inner: DashMap<String, CacheValue>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held, including ones that expired but were not read since.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl RateCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        if let Some(entry) = self.inner.get(key) {
            if entry.expires_at > now {
                debug!("Cache HIT for key: {}", key);
                return Ok(Some(entry.value.clone()));
            }
        }

        if self
            .inner
            .remove_if(key, |_, entry| entry.expires_at <= now)
            .is_some()
        {
            debug!("Cache entry expired for key: {}", key);
        } else {
            debug!("Cache MISS for key: {}", key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        debug!("Cache PUT for key: {}", key);
        self.inner.insert(
            key.to_string(),
            CacheValue {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(1800);

    #[tokio::test]
    async fn test_get_set() {
        let cache = MemoryCache::new();

        assert!(cache.get("first_rates").await.unwrap().is_none());

        cache.set("first_rates", r#"{"a":1}"#, TTL).await.unwrap();

        assert_eq!(
            cache.get("first_rates").await.unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
        assert!(cache.get("second_rates").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let cache = MemoryCache::new();

        cache.set("k", "1", TTL).await.unwrap();
        cache.set("k", "2", TTL).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("2"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = MemoryCache::new();
        cache.set("first_rates", "{}", TTL).await.unwrap();

        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        assert!(cache.get("first_rates").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get("first_rates").await.unwrap().is_none());
        assert!(cache.is_empty());
    }
}
