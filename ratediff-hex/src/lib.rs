//! # Rate Diff Hex
//!
//! Application service layer, HTTP adapter and upstream clients for the rate
//! diff service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (cache-or-fetch, diff, history)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `outbound/` - Upstream provider client (reqwest)
//!
//! The service is generic over its repository, cache and rate source, allowing
//! different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod outbound;
pub mod service;


pub use outbound::HttpRateSource;
pub use service::{HISTORY_LIMIT, RateService};
