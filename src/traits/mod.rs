//! Core traits for the dashboard

pub mod event_handler;
pub mod market_data_provider;
pub mod responder;

// Re-export for convenience
pub use event_handler::DashboardEventHandler;
pub use market_data_provider::MarketDataProvider;
pub use responder::AssistantResponder;
