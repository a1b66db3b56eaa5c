//! # Rate Diff Repository
//!
//! Concrete storage implementations (adapters) for the rate diff service.
//! This crate provides database adapters that implement the `RateRepository`
//! port and cache adapters that implement the `RateCache` port.

#[cfg(not(any(feature = "postgres", feature = "sqlite")))]
compile_error!("Enable a repo feature: `postgres` or `sqlite`.");

use async_trait::async_trait;
use ratediff_types::{ExchangeRateRecord, NewExchangeRate, RateRepository, RepoError};

pub mod cache;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "postgres", feature = "sqlite"))]
mod types;


pub use cache::{Cache, MemoryCache, RedisCache, build_cache};

/// Unified repository wrapper that handles both SQLite and PostgreSQL.
///
/// The adapter is picked from the database URL scheme.
pub struct Repo {
    inner: RepoInner,
}

enum RepoInner {
    #[cfg(feature = "postgres")]
    Postgres(postgres::PostgresRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteRepo),
}

/// Build and initialize a repository from a database URL.
///
/// This function:
/// 1. Connects to the database
/// 2. Creates the `exchange_rates` table if it is missing
/// 3. Returns a ready-to-use `Repo`
///
/// # Examples
///
/// ```ignore
/// // SQLite (with `sqlite` feature)
/// let repo = build_repo("sqlite://rates.db?mode=rwc").await?;
///
/// // PostgreSQL (with `postgres` feature)
/// let repo = build_repo("postgresql://user:password@db:5432/currency_db").await?;
/// ```
pub async fn build_repo(database_url: &str) -> anyhow::Result<Repo> {
    Repo::new(database_url).await
}

impl Repo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        #[cfg(feature = "postgres")]
        {
            if database_url.starts_with("postgres://")
                || database_url.starts_with("postgresql://")
            {
                let inner = postgres::PostgresRepo::new(database_url).await?;
                return Ok(Self {
                    inner: RepoInner::Postgres(inner),
                });
            }
        }

        #[cfg(feature = "sqlite")]
        {
            if database_url.starts_with("sqlite:") {
                let inner = sqlite::SqliteRepo::new(database_url).await?;
                return Ok(Self {
                    inner: RepoInner::Sqlite(inner),
                });
            }
        }

        anyhow::bail!(
            "Unsupported database URL (enabled backends: {}): {}",
            enabled_backends(),
            database_url
        )
    }

    /// Closes the underlying connection pool.
    pub async fn close(&self) {
        match &self.inner {
            #[cfg(feature = "postgres")]
            RepoInner::Postgres(repo) => repo.pool().close().await,
            #[cfg(feature = "sqlite")]
            RepoInner::Sqlite(repo) => repo.pool().close().await,
        }
    }
}

fn enabled_backends() -> &'static str {
    if cfg!(all(feature = "postgres", feature = "sqlite")) {
        "postgres, sqlite"
    } else if cfg!(feature = "postgres") {
        "postgres"
    } else {
        "sqlite"
    }
}

// Re-export individual repos for direct use if needed
#[cfg(feature = "postgres")]
pub use postgres::PostgresRepo;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepo;

// ─────────────────────────────────────────────────────────────────────────────
// Implement RateRepository for Repo (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateRepository for Repo {
    async fn insert_rate(&self, rate: NewExchangeRate) -> Result<ExchangeRateRecord, RepoError> {
        match &self.inner {
            #[cfg(feature = "postgres")]
            RepoInner::Postgres(repo) => repo.insert_rate(rate).await,
            #[cfg(feature = "sqlite")]
            RepoInner::Sqlite(repo) => repo.insert_rate(rate).await,
        }
    }

    async fn recent_rates(&self, limit: i64) -> Result<Vec<ExchangeRateRecord>, RepoError> {
        match &self.inner {
            #[cfg(feature = "postgres")]
            RepoInner::Postgres(repo) => repo.recent_rates(limit).await,
            #[cfg(feature = "sqlite")]
            RepoInner::Sqlite(repo) => repo.recent_rates(limit).await,
        }
    }
}
