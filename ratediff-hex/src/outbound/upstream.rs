//! HTTP client for the upstream rate providers.

use async_trait::async_trait;
use reqwest::Client;

use ratediff_types::{Provider, RateSource, UpstreamError};

/// Fetches provider documents over HTTP.
///
/// A single GET per call: no retries and no timeout beyond reqwest's defaults.
#[derive(Clone)]
pub struct HttpRateSource {
    http: Client,
    first_url: String,
    second_url: String,
}

impl HttpRateSource {
    /// Creates a source with explicit provider URLs.
    pub fn new(first_url: impl Into<String>, second_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), first_url, second_url)
    }

    pub fn with_client(
        http: Client,
        first_url: impl Into<String>,
        second_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            first_url: first_url.into(),
            second_url: second_url.into(),
        }
    }

    fn url_for(&self, provider: Provider) -> &str {
        match provider {
            Provider::First => &self.first_url,
            Provider::Second => &self.second_url,
        }
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    // The first provider's URL embeds the API key, so it is never logged.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, provider: Provider) -> Result<String, UpstreamError> {
        let resp = self
            .http
            .get(self.url_for(provider))
            .send()
            .await
            .map_err(|e| UpstreamError::Transport {
                provider,
                message: e.without_url().to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Upstream returned an error status");
            return Err(UpstreamError::Status {
                provider,
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(|e| UpstreamError::Transport {
            provider,
            message: e.without_url().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HttpRateSource {
        HttpRateSource::new(
            format!("{}/v6/test-key/latest/USD", server.uri()),
            format!("{}/currencies/usd.json", server.uri()),
        )
    }

    #[tokio::test]
    async fn test_fetch_returns_body_verbatim() {
        let server = MockServer::start().await;
        let body = r#"{"usd": {"eur": 1.05}}"#;
        Mock::given(method("GET"))
            .and(path("/currencies/usd.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let source = source_for(&server);
        let fetched = source.fetch(Provider::Second).await.unwrap();

        assert_eq!(fetched, body);
    }

    #[tokio::test]
    async fn test_fetch_routes_by_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v6/test-key/latest/USD"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"conversion_rates": {}}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let source = source_for(&server);
        let fetched = source.fetch(Provider::First).await.unwrap();

        assert!(fetched.contains("conversion_rates"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"result": "error"}"#))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let err = source.fetch(Provider::First).await.unwrap_err();

        assert!(matches!(
            err,
            UpstreamError::Status {
                provider: Provider::First,
                status: 403
            }
        ));
    }

    #[tokio::test]
    async fn test_fetch_unreachable() {
        let source = HttpRateSource::new("http://127.0.0.1:9/first", "http://127.0.0.1:9/second");

        let err = source.fetch(Provider::Second).await.unwrap_err();

        assert!(matches!(
            err,
            UpstreamError::Transport {
                provider: Provider::Second,
                ..
            }
        ));
    }
}
