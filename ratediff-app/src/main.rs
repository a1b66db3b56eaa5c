//! # Rate Diff Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository and cache adapters
//! - Create the rate service over the upstream providers
//! - Start the HTTP server

mod config;

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ratediff_hex::{HttpRateSource, RateService, inbound::HttpServer};
use ratediff_repo::{Repo, build_cache, build_repo};
use ratediff_types::{RateCache, RateSource};

use config::{Config, redact_url};

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("ratediff-service"), provider))
}

fn open_log_file(path: &Path) -> anyhow::Result<Arc<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    Ok(Arc::new(file))
}

/// Serves until shutdown, then closes the pool whether serving succeeded or not.
async fn serve_and_close<C: RateCache, S: RateSource>(
    server: HttpServer<Repo, C, S>,
    addr: &str,
) -> anyhow::Result<()> {
    let state = server.state();
    let served = server.run(addr).await;

    state.service.repo().close().await;
    tracing::info!("Connections closed");
    served
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Export spans only when a collector is configured
    let otel = match &config.otlp_endpoint {
        Some(_) => Some(init_tracer()?),
        None => None,
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    let file_log = match &config.log_file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(open_log_file(path)?),
        ),
        None => None,
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ratediff_app=debug,ratediff_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_log)
        .with(telemetry)
        .init();

    tracing::info!("Starting rate diff server on port {}", config.port);
    tracing::info!("Connecting to database and redis...");
    tracing::info!("Using database: {}", redact_url(&config.database_url));
    tracing::info!("Using cache: {}", redact_url(&config.redis_url));

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;
    let cache = build_cache(&config.redis_url).await?;
    tracing::info!("Database and cache ready");

    let source = HttpRateSource::new(&config.first_rates_url, &config.second_rates_url);
    let service = RateService::new(repo, cache, source).with_cache_ttl(config.cache_ttl);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    let served = serve_and_close(server, &addr).await;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    served
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratediff_repo::MemoryCache;

    #[tokio::test]
    async fn test_pool_closed_when_serving_fails() {
        // Hold the port so the server cannot bind it.
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap().to_string();

        let repo = build_repo("sqlite::memory:").await.unwrap();
        let source = HttpRateSource::new("http://127.0.0.1:9/first", "http://127.0.0.1:9/second");
        let server = HttpServer::new(RateService::new(repo, MemoryCache::new(), source));
        let state = server.state();

        let result = serve_and_close(server, &addr).await;

        assert!(result.is_err());
        assert!(state.service.history().await.is_err());
    }
}
