//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use ratediff_types::{RateCache, RateRepository, RateSource};

use super::handlers::{self, AppState};
use crate::RateService;

/// HTTP Server for the Rate Diff API.
pub struct HttpServer<R: RateRepository, C: RateCache, S: RateSource> {
    state: Arc<AppState<R, C, S>>,
}

impl<R: RateRepository, C: RateCache, S: RateSource> HttpServer<R, C, S> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: RateService<R, C, S>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Shared state, kept by the caller to release connections after shutdown.
    pub fn state(&self) -> Arc<AppState<R, C, S>> {
        self.state.clone()
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/first", get(handlers::first::<R, C, S>))
            .route("/second", get(handlers::second::<R, C, S>))
            .route("/diff", get(handlers::diff::<R, C, S>))
            .route("/history", get(handlers::history::<R, C, S>))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
