//! Data Transfer Objects (DTOs) for responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /diff`: currency code to absolute rate difference.
pub type DiffTable = BTreeMap<String, f64>;

/// JSON body returned with every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable failure description
    #[schema(example = "Upstream error: first provider returned HTTP 403")]
    pub error: String,
    /// HTTP status code, repeated for convenience
    #[schema(example = 502)]
    pub code: u16,
}
