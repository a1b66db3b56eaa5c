//! Cache port trait.

use std::time::Duration;

use crate::error::CacheError;

/// String-valued key/value store with per-key expiry.
#[async_trait::async_trait]
pub trait RateCache: Send + Sync + 'static {
    /// Returns the live value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, replacing any previous value, for `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}
