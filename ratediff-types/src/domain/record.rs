//! Persisted exchange rate comparison.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use exchange_rates::RateDiff;

/// One row of the `exchange_rates` table.
///
/// Rows are append-only: created once per matched currency per diff run and
/// never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRateRecord {
    /// Auto-increment primary key
    #[schema(example = 42)]
    pub id: i64,
    /// Currency code as quoted by the first provider
    #[schema(example = "EUR")]
    pub currency: String,
    /// Rate reported by the first provider
    #[schema(example = 1.1)]
    pub rate1: f64,
    /// Rate reported by the second provider
    #[schema(example = 1.05)]
    pub rate2: f64,
    /// Absolute difference between the two rates
    #[schema(example = 0.05)]
    pub diff: f64,
    /// Creation time, set by the database
    #[schema(value_type = String, example = "2024-05-01T12:00:00.123")]
    pub timestamp: NaiveDateTime,
}

/// Insert shape for an exchange rate row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExchangeRate {
    pub currency: String,
    pub rate1: f64,
    pub rate2: f64,
    pub diff: f64,
}

impl From<RateDiff> for NewExchangeRate {
    fn from(d: RateDiff) -> Self {
        Self {
            currency: d.currency,
            rate1: d.rate1,
            rate2: d.rate2,
            diff: d.diff,
        }
    }
}

impl From<&RateDiff> for NewExchangeRate {
    fn from(d: &RateDiff) -> Self {
        d.clone().into()
    }
}
