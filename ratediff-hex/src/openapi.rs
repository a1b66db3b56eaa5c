//! OpenAPI document for the HTTP routes.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use ratediff_types::{ErrorResponse, ExchangeRateRecord};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Rates from the first provider (cached for 30 minutes)
#[utoipa::path(
    get,
    path = "/first",
    tag = "rates",
    responses(
        (status = 200, description = "Provider document, verbatim", body = inline(serde_json::Value),
            example = json!({"result": "success", "base_code": "USD", "conversion_rates": {"EUR": 1.1}})),
        (status = 502, description = "Provider unreachable or returned an error", body = ErrorResponse)
    )
)]
async fn first() {}

/// Rates from the second provider (cached for 30 minutes)
#[utoipa::path(
    get,
    path = "/second",
    tag = "rates",
    responses(
        (status = 200, description = "Provider document, verbatim", body = inline(serde_json::Value),
            example = json!({"date": "2024-05-01", "usd": {"eur": 1.05}})),
        (status = 502, description = "Provider unreachable or returned an error", body = ErrorResponse)
    )
)]
async fn second() {}

/// Compare both providers and save one row per shared currency
#[utoipa::path(
    get,
    path = "/diff",
    tag = "diff",
    responses(
        (status = 200, description = "Absolute difference per currency", body = inline(serde_json::Value),
            example = json!({"EUR": 0.05})),
        (status = 500, description = "Cache or database failure", body = ErrorResponse),
        (status = 502, description = "Provider unreachable or returned an error", body = ErrorResponse)
    )
)]
async fn diff() {}

/// Last 10 saved diffs, newest first
#[utoipa::path(
    get,
    path = "/history",
    tag = "diff",
    responses(
        (status = 200, description = "Saved diffs", body = Vec<ExchangeRateRecord>),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
async fn history() {}

/// OpenAPI documentation for the Rate Diff API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rate Diff Service API",
        version = "1.0.0",
        description = "Fetches USD exchange rates from two providers, caches them, and records how far apart the providers are per currency.",
    ),
    paths(first, second, diff, history),
    components(schemas(ExchangeRateRecord, ErrorResponse)),
    tags(
        (name = "rates", description = "Cached provider documents"),
        (name = "diff", description = "Provider comparison and its history"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_routes() {
        let doc = ApiDoc::openapi();
        for route in ["/first", "/second", "/diff", "/history"] {
            assert!(doc.paths.paths.contains_key(route), "missing {route}");
        }
    }
}
