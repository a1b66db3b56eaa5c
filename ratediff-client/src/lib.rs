//! # Rate Diff Client SDK
//!
//! A typed Rust client for the Rate Diff API.

use ratediff_types::{DiffTable, ExchangeRateRecord};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rate Diff API client.
pub struct RateDiffClient {
    base_url: String,
    http: Client,
}

impl RateDiffClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Document served by the first provider, as cached by the service.
    pub async fn first(&self) -> Result<serde_json::Value, ClientError> {
        self.get("/first").await
    }

    /// Document served by the second provider, as cached by the service.
    pub async fn second(&self) -> Result<serde_json::Value, ClientError> {
        self.get("/second").await
    }

    /// Compares both providers. Every call records one row per shared currency.
    pub async fn diff(&self) -> Result<DiffTable, ClientError> {
        self.get("/diff").await
    }

    /// The most recently recorded diffs, newest first.
    pub async fn history(&self) -> Result<Vec<ExchangeRateRecord>, ClientError> {
        self.get("/history").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = RateDiffClient::new("http://localhost:8000");
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = RateDiffClient::new("http://localhost:8000/");
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_diff_and_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/diff"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"EUR": 0.05}"#))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"id": 1, "currency": "EUR", "rate1": 1.1, "rate2": 1.05,
                     "diff": 0.05, "timestamp": "2024-05-01T12:00:00"}]"#,
            ))
            .mount(&server)
            .await;
        let client = RateDiffClient::new(server.uri());

        let diff = client.diff().await.unwrap();
        assert_eq!(diff["EUR"], 0.05);

        let history = client.history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, 1);
        assert_eq!(history[0].currency, "EUR");
    }

    #[tokio::test]
    async fn test_api_error_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/first"))
            .respond_with(ResponseTemplate::new(502).set_body_string(
                r#"{"error": "first provider returned HTTP 403", "code": 502}"#,
            ))
            .mount(&server)
            .await;
        let client = RateDiffClient::new(server.uri());

        let err = client.first().await.unwrap_err();

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "first provider returned HTTP 403");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
