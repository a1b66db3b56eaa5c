//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod cache;
mod repository;
mod upstream;

pub use cache::RateCache;
pub use repository::RateRepository;
pub use upstream::RateSource;
