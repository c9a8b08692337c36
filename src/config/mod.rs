//! Configuration module for the crypto dashboard.

pub mod coingecko;

mod debug; // Private: callers go through crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod plot;
pub mod refresh;

// Re-export commonly used items
pub use coingecko::{COINGECKO, FetchPolicy, RetryPolicy};
pub use refresh::REFRESH;
