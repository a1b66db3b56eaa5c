//! Repository port trait.
//!
//! Adapters (Postgres, SQLite) implement this trait.

use crate::domain::{ExchangeRateRecord, NewExchangeRate};
use crate::error::RepoError;

/// Append-only store of computed rate differences.
///
/// Each insert stands alone; there is no transaction spanning several inserts.
#[async_trait::async_trait]
pub trait RateRepository: Send + Sync + 'static {
    /// Appends a row and returns it with its generated id and timestamp.
    async fn insert_rate(&self, rate: NewExchangeRate) -> Result<ExchangeRateRecord, RepoError>;

    /// Returns up to `limit` rows, newest first.
    async fn recent_rates(&self, limit: i64) -> Result<Vec<ExchangeRateRecord>, RepoError>;
}
