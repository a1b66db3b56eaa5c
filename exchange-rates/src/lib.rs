//! Exchange Rate Documents and Diff Engine
//!
//! This library knows the shape of the two upstream rate documents and how to
//! join them. It performs no IO: callers hand it JSON text and get typed
//! documents and per-currency differences back.
//!
//! # Example
//! ```
//! use exchange_rates::{FirstProviderRates, SecondProviderRates, compute_diffs};
//!
//! let first = FirstProviderRates::from_json(r#"{"conversion_rates": {"EUR": 1.1}}"#).unwrap();
//! let second = SecondProviderRates::from_json(r#"{"usd": {"eur": 1.05}}"#).unwrap();
//!
//! let diffs = compute_diffs(&first, &second);
//! assert_eq!(diffs.len(), 1);
//! assert_eq!(diffs[0].currency, "EUR");
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

use serde::Deserialize;

// ─────────────────────────────────────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────────────────────────────────────

/// How long a fetched provider document stays cached.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(1800);

/// Default URL template for the first provider; `{API_KEY}` is substituted.
pub const FIRST_PROVIDER_URL_TEMPLATE: &str =
    "https://v6.exchangerate-api.com/v6/{API_KEY}/latest/USD";

/// Default URL of the second provider.
pub const SECOND_PROVIDER_URL: &str =
    "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/usd.json";

/// One of the two upstream rate providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Keyed API returning `conversion_rates` with upper-case codes.
    First,
    /// Public CDN feed returning `usd` with lower-case codes.
    Second,
}

impl Provider {
    /// Fixed cache slot for this provider's document.
    pub fn cache_key(&self) -> &'static str {
        match self {
            Provider::First => "first_rates",
            Provider::Second => "second_rates",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::First => "first",
            Provider::Second => "second",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Builds the first provider's URL from a template and an API key.
pub fn first_provider_url(template: &str, api_key: &str) -> String {
    template.replace("{API_KEY}", api_key)
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Error type for document parsing.
#[derive(Debug, thiserror::Error)]
pub enum RatesError {
    #[error("Malformed {provider} rates document: {source}")]
    Malformed {
        provider: Provider,
        #[source]
        source: serde_json::Error,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider documents
// ─────────────────────────────────────────────────────────────────────────────

/// Document returned by the first provider.
///
/// Only `conversion_rates` is read; everything else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FirstProviderRates {
    pub conversion_rates: BTreeMap<String, f64>,
}

impl FirstProviderRates {
    pub fn from_json(text: &str) -> Result<Self, RatesError> {
        serde_json::from_str(text).map_err(|source| RatesError::Malformed {
            provider: Provider::First,
            source,
        })
    }
}

/// Document returned by the second provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SecondProviderRates {
    pub usd: HashMap<String, f64>,
}

impl SecondProviderRates {
    pub fn from_json(text: &str) -> Result<Self, RatesError> {
        serde_json::from_str(text).map_err(|source| RatesError::Malformed {
            provider: Provider::Second,
            source,
        })
    }

    /// Looks up a rate by currency code, case-insensitively.
    pub fn rate_for(&self, currency: &str) -> Option<f64> {
        self.usd.get(&currency.to_lowercase()).copied()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Diff engine
// ─────────────────────────────────────────────────────────────────────────────

/// A currency quoted by both providers.
#[derive(Debug, Clone, PartialEq)]
pub struct RateDiff {
    pub currency: String,
    pub rate1: f64,
    pub rate2: f64,
    pub diff: f64,
}

impl RateDiff {
    pub fn new(currency: impl Into<String>, rate1: f64, rate2: f64) -> Self {
        Self {
            currency: currency.into(),
            rate1,
            rate2,
            diff: (rate1 - rate2).abs(),
        }
    }
}

/// Joins the two documents on currency code.
///
/// Iterates the first provider's codes in ascending order. A code matches when
/// its lower-cased form is present in the second provider's map, including
/// when the quoted rate is `0.0`. Codes quoted by only one provider are skipped.
pub fn compute_diffs(first: &FirstProviderRates, second: &SecondProviderRates) -> Vec<RateDiff> {
    first
        .conversion_rates
        .iter()
        .filter_map(|(currency, &rate1)| {
            second
                .rate_for(currency)
                .map(|rate2| RateDiff::new(currency.as_str(), rate1, rate2))
        })
        .collect()
}

/// Collapses joined rows into the `currency -> diff` mapping served to callers.
pub fn diff_table<'a>(diffs: impl IntoIterator<Item = &'a RateDiff>) -> BTreeMap<String, f64> {
    diffs
        .into_iter()
        .map(|d| (d.currency.clone(), d.diff))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = r#"{
        "result": "success",
        "base_code": "USD",
        "conversion_rates": {"EUR": 1.1, "GBP": 1.3}
    }"#;
    const SECOND: &str = r#"{"date": "2024-05-01", "usd": {"eur": 1.05, "jpy": 150.0}}"#;

    #[test]
    fn test_cache_keys() {
        assert_eq!(Provider::First.cache_key(), "first_rates");
        assert_eq!(Provider::Second.cache_key(), "second_rates");
    }

    #[test]
    fn test_first_provider_url() {
        let url = first_provider_url(FIRST_PROVIDER_URL_TEMPLATE, "abc123");
        assert_eq!(url, "https://v6.exchangerate-api.com/v6/abc123/latest/USD");
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let first = FirstProviderRates::from_json(FIRST).unwrap();
        assert_eq!(first.conversion_rates.len(), 2);

        let second = SecondProviderRates::from_json(SECOND).unwrap();
        assert_eq!(second.rate_for("JPY"), Some(150.0));
    }

    #[test]
    fn test_parse_missing_mapping_is_malformed() {
        let err = FirstProviderRates::from_json(r#"{"result": "error"}"#).unwrap_err();
        assert!(matches!(
            err,
            RatesError::Malformed {
                provider: Provider::First,
                ..
            }
        ));

        let err = SecondProviderRates::from_json("not json").unwrap_err();
        assert!(err.to_string().contains("second"));
    }

    #[test]
    fn test_compute_diffs_joins_case_insensitively() {
        let first = FirstProviderRates::from_json(FIRST).unwrap();
        let second = SecondProviderRates::from_json(SECOND).unwrap();

        let diffs = compute_diffs(&first, &second);

        assert_eq!(diffs.len(), 1);
        let eur = &diffs[0];
        assert_eq!(eur.currency, "EUR");
        assert_eq!(eur.rate1, 1.1);
        assert_eq!(eur.rate2, 1.05);
        assert!((eur.diff - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_diff_is_absolute() {
        let d = RateDiff::new("JPY", 140.0, 150.0);
        assert_eq!(d.diff, 10.0);
    }

    #[test]
    fn test_zero_rate_still_matches() {
        let first = FirstProviderRates::from_json(r#"{"conversion_rates": {"XAU": 0.5}}"#).unwrap();
        let second = SecondProviderRates::from_json(r#"{"usd": {"xau": 0.0}}"#).unwrap();

        let diffs = compute_diffs(&first, &second);

        assert_eq!(diffs, vec![RateDiff::new("XAU", 0.5, 0.0)]);
        assert_eq!(diffs[0].diff, 0.5);
    }

    #[test]
    fn test_diffs_follow_code_order() {
        let first = FirstProviderRates::from_json(
            r#"{"conversion_rates": {"USD": 1.0, "CHF": 0.9, "EUR": 1.1}}"#,
        )
        .unwrap();
        let second =
            SecondProviderRates::from_json(r#"{"usd": {"usd": 1.0, "chf": 0.91, "eur": 1.0}}"#)
                .unwrap();

        let codes: Vec<_> = compute_diffs(&first, &second)
            .into_iter()
            .map(|d| d.currency)
            .collect();

        assert_eq!(codes, vec!["CHF", "EUR", "USD"]);
    }

    #[test]
    fn test_diff_table() {
        let diffs = vec![RateDiff::new("EUR", 1.1, 1.0), RateDiff::new("USD", 1.0, 1.0)];
        let table = diff_table(&diffs);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("USD"), Some(&0.0));
    }
}
