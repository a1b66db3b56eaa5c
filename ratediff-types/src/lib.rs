//! # Rate Diff Types
//!
//! Domain types and port traits for the rate diff service.
//! This crate has ZERO external IO dependencies - only data structures
//! and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (ExchangeRateRecord, RawRates)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Adapter and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{ExchangeRateRecord, NewExchangeRate, RawRates};
pub use dto::*;
pub use error::{AppError, CacheError, RepoError, UpstreamError};
pub use exchange_rates::{Provider, RateDiff};
pub use ports::{RateCache, RateRepository, RateSource};
