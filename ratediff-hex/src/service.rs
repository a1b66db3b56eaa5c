//! Rate Application Service
//!
//! Orchestrates the cache, the upstream rate source and the repository
//! through their ports. Contains NO infrastructure logic.

use std::time::Duration;

use exchange_rates::{
    DEFAULT_CACHE_TTL, FirstProviderRates, SecondProviderRates, compute_diffs, diff_table,
};
use ratediff_types::{
    AppError, CacheError, DiffTable, ExchangeRateRecord, Provider, RateCache, RateRepository,
    RateSource, RawRates, UpstreamError,
};

/// Number of rows returned by the history query.
pub const HISTORY_LIMIT: i64 = 10;

/// Application service for rate operations.
///
/// Generic over the repository, cache and upstream source; adapters are
/// injected at compile time.
pub struct RateService<R: RateRepository, C: RateCache, S: RateSource> {
    repo: R,
    cache: C,
    source: S,
    cache_ttl: Duration,
}

impl<R: RateRepository, C: RateCache, S: RateSource> RateService<R, C, S> {
    /// Creates a service caching provider documents for the default TTL.
    pub fn new(repo: R, cache: C, source: S) -> Self {
        Self {
            repo,
            cache,
            source,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Overrides how long fetched documents stay cached.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the underlying cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Returns a reference to the upstream source.
    pub fn source(&self) -> &S {
        &self.source
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Cache-or-fetch
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns a provider's document, from cache when present.
    ///
    /// On a miss the upstream body is validated as JSON and written to the
    /// cache verbatim. Failed fetches are never cached.
    #[tracing::instrument(skip(self), fields(key = provider.cache_key()))]
    pub async fn rates(&self, provider: Provider) -> Result<RawRates, AppError> {
        let key = provider.cache_key();

        if let Some(cached) = self.cache.get(key).await? {
            let raw = RawRates::parse(cached).map_err(|e| CacheError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
            tracing::info!("Using cached data for /{}", provider);
            return Ok(raw);
        }

        let body = self.source.fetch(provider).await?;
        let raw = RawRates::parse(body).map_err(|e| UpstreamError::Malformed {
            provider,
            message: e.to_string(),
        })?;
        tracing::info!("Fetched data from {} API", provider);

        self.cache.set(key, raw.as_str(), self.cache_ttl).await?;
        Ok(raw)
    }

    pub async fn first_rates(&self) -> Result<RawRates, AppError> {
        self.rates(Provider::First).await
    }

    pub async fn second_rates(&self) -> Result<RawRates, AppError> {
        self.rates(Provider::Second).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Diff & History
    // ─────────────────────────────────────────────────────────────────────────────

    /// Joins both providers' documents and persists one row per matched currency.
    ///
    /// Rows are inserted one by one without a surrounding transaction: if an
    /// insert fails, earlier rows stay and the remaining currencies are skipped.
    pub async fn diff(&self) -> Result<DiffTable, AppError> {
        tracing::info!("Calculating currency differences...");

        let (first, second) = tokio::try_join!(self.first_rates(), self.second_rates())?;
        let first = FirstProviderRates::from_json(first.as_str())?;
        let second = SecondProviderRates::from_json(second.as_str())?;

        let diffs = compute_diffs(&first, &second);
        for diff in &diffs {
            let record = self.repo.insert_rate(diff.into()).await?;
            tracing::info!(id = record.id, "Saved diff for {}: {}", record.currency, record.diff);
        }

        Ok(diff_table(&diffs))
    }

    /// Returns the most recently saved diffs, newest first.
    pub async fn history(&self) -> Result<Vec<ExchangeRateRecord>, AppError> {
        let rows = self.repo.recent_rates(HISTORY_LIMIT).await?;
        tracing::info!("Fetched last {} currency exchange rates", rows.len());
        Ok(rows)
    }
}
