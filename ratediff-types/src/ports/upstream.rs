//! Upstream rate provider port.
//!
//! Implementations can be HTTP clients, fixed fakes, etc.

use exchange_rates::Provider;

use crate::error::UpstreamError;

/// Fetches the raw document published by a provider.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync + 'static {
    /// Returns the response body text of a successful fetch.
    async fn fetch(&self, provider: Provider) -> Result<String, UpstreamError>;
}
