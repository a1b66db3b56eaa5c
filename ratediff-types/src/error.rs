//! Error types for the rate diff service.

use exchange_rates::{Provider, RatesError};

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

/// Cache-level errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),

    #[error("Cache command failed: {0}")]
    Command(String),

    #[error("Cached {key} is not valid JSON: {reason}")]
    Corrupt { key: String, reason: String },
}

/// Upstream provider errors.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{provider} provider request failed: {message}")]
    Transport { provider: Provider, message: String },

    #[error("{provider} provider returned HTTP {status}")]
    Status { provider: Provider, status: u16 },

    #[error("{provider} provider returned malformed JSON: {message}")]
    Malformed { provider: Provider, message: String },
}

impl From<RatesError> for UpstreamError {
    fn from(err: RatesError) -> Self {
        match err {
            RatesError::Malformed { provider, source } => UpstreamError::Malformed {
                provider,
                message: source.to_string(),
            },
        }
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl From<RatesError> for AppError {
    fn from(err: RatesError) -> Self {
        UpstreamError::from(err).into()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_maps_to_upstream() {
        let err: AppError = UpstreamError::Status {
            provider: Provider::First,
            status: 403,
        }
        .into();
        assert!(matches!(err, AppError::Upstream(ref m) if m.contains("HTTP 403")));
    }

    #[test]
    fn test_storage_maps_to_internal() {
        let err: AppError = RepoError::Database("pool closed".into()).into();
        assert!(matches!(err, AppError::Internal(_)));

        let err: AppError = CacheError::Connection("refused".into()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
