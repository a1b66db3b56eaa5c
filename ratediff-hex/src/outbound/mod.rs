//! Outbound adapters for upstream rate providers.

mod upstream;

pub use upstream::HttpRateSource;
