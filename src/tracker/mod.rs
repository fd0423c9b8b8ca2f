//! Background work of a dashboard session

pub mod chat_simulator;
pub mod market_poller;

// Re-export for convenience
pub use chat_simulator::ChatSimulator;
pub use market_poller::MarketPoller;
