//! Market data and assistant reply providers

pub mod canned_responder;
pub mod coingecko_provider;

// Re-export for convenience
pub use canned_responder::{CannedResponder, CANNED_RESPONSES};
pub use coingecko_provider::CoinGeckoProvider;
