//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use ratediff_types::{AppError, ErrorResponse, RateCache, RateRepository, RateSource, RawRates};

use crate::RateService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<R: RateRepository, C: RateCache, S: RateSource> {
    pub service: RateService<R, C, S>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(status = status.as_u16(), "{}", self.0);

        let body = ErrorResponse {
            error: self.0.to_string(),
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Serves a provider document exactly as cached.
fn raw_json(raw: RawRates) -> Response {
    (
        [(header::CONTENT_TYPE, "application/json")],
        raw.into_string(),
    )
        .into_response()
}

/// Document from the first provider.
#[tracing::instrument(skip(state))]
pub async fn first<R: RateRepository, C: RateCache, S: RateSource>(
    State(state): State<Arc<AppState<R, C, S>>>,
) -> Result<Response, ApiError> {
    let raw = state.service.first_rates().await?;
    Ok(raw_json(raw))
}

/// Document from the second provider.
#[tracing::instrument(skip(state))]
pub async fn second<R: RateRepository, C: RateCache, S: RateSource>(
    State(state): State<Arc<AppState<R, C, S>>>,
) -> Result<Response, ApiError> {
    let raw = state.service.second_rates().await?;
    Ok(raw_json(raw))
}

/// Per-currency difference between the two providers.
#[tracing::instrument(skip(state))]
pub async fn diff<R: RateRepository, C: RateCache, S: RateSource>(
    State(state): State<Arc<AppState<R, C, S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let table = state.service.diff().await?;
    Ok(Json(table))
}

/// Last saved diffs, newest first.
#[tracing::instrument(skip(state))]
pub async fn history<R: RateRepository, C: RateCache, S: RateSource>(
    State(state): State<Arc<AppState<R, C, S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state.service.history().await?;
    Ok(Json(rows))
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
