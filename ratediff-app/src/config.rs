//! Configuration loading from environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use exchange_rates::{
    DEFAULT_CACHE_TTL, FIRST_PROVIDER_URL_TEMPLATE, SECOND_PROVIDER_URL, first_provider_url,
};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "postgresql://user:password@db:5432/currency_db";
const DEFAULT_REDIS_URL: &str = "redis://redis:6379";
/// Placeholder key; the first provider rejects it until a real key is supplied.
const DEFAULT_API_KEY: &str = "nope";

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub redis_url: String,
    pub first_rates_url: String,
    pub second_rates_url: String,
    pub cache_ttl: Duration,
    pub log_file: Option<PathBuf>,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match var("PORT") {
            Some(port) => port.parse()?,
            None => DEFAULT_PORT,
        };

        let cache_ttl = match var("CACHE_TTL_SECS") {
            Some(secs) => Duration::from_secs(secs.parse()?),
            None => DEFAULT_CACHE_TTL,
        };

        let api_key = var("EXCHANGE_RATE_API_KEY").unwrap_or_else(|| DEFAULT_API_KEY.into());
        let first_template =
            var("FIRST_RATES_URL").unwrap_or_else(|| FIRST_PROVIDER_URL_TEMPLATE.into());

        Ok(Self {
            port,
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            redis_url: var("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.into()),
            first_rates_url: first_provider_url(&first_template, &api_key),
            second_rates_url: var("SECOND_RATES_URL")
                .unwrap_or_else(|| SECOND_PROVIDER_URL.into()),
            cache_ttl,
            log_file: var("LOG_FILE").map(PathBuf::from),
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}

/// Hides credentials in a connection URL before it is logged.
pub fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.redis_url, "redis://redis:6379");
        assert_eq!(
            config.first_rates_url,
            "https://v6.exchangerate-api.com/v6/nope/latest/USD"
        );
        assert_eq!(config.second_rates_url, SECOND_PROVIDER_URL);
        assert_eq!(config.cache_ttl, Duration::from_secs(1800));
        assert!(config.log_file.is_none());
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9090"),
            ("DATABASE_URL", "sqlite://data/rates.db?mode=rwc"),
            ("REDIS_URL", "memory://"),
            ("EXCHANGE_RATE_API_KEY", "secret"),
            ("FIRST_RATES_URL", "http://localhost:1234/{API_KEY}/usd"),
            ("CACHE_TTL_SECS", "60"),
            ("LOG_FILE", "/app/logs/app.log"),
        ])
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.database_url, "sqlite://data/rates.db?mode=rwc");
        assert_eq!(config.redis_url, "memory://");
        assert_eq!(config.first_rates_url, "http://localhost:1234/secret/usd");
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.log_file, Some(PathBuf::from("/app/logs/app.log")));
    }

    #[test]
    fn test_invalid_port() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
    }

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact_url("postgresql://user:password@db:5432/currency_db"),
            "postgresql://***@db:5432/currency_db"
        );
        assert_eq!(redact_url("redis://redis:6379"), "redis://redis:6379");
        assert_eq!(redact_url("sqlite::memory:"), "sqlite::memory:");
    }
}
