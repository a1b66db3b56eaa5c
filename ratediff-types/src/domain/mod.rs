//! Domain models for the rate diff service.

pub mod payload;
pub mod record;

pub use payload::RawRates;
pub use record::{ExchangeRateRecord, NewExchangeRate};
