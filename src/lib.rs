//! CryptoGenius dashboard library
//!
//! An in-memory crypto dashboard session: a market poller that keeps a
//! top-assets snapshot fresh and reprices held positions, a subscription
//! plan gate, and a simulated assistant chat with delayed canned replies.

// Public modules - these are the API surface
pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notifications;
pub mod providers;
pub mod session;
pub mod tracker;
pub mod traits;
pub mod utils;
pub mod view;

// Re-export commonly used items for easier access
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};
pub use handlers::{CompositeEventHandler, ConsoleEventHandler};
pub use models::{
    can_query, Asset, ChatMessage, ChatRole, Plan, PlanTier, Portfolio, Position, Quota,
};
pub use notifications::{DashboardEvent, NotificationQueue, Toast, ToastLevel};
pub use providers::{CannedResponder, CoinGeckoProvider};
pub use session::{Action, AppState, SendOutcome, SessionStore, Tab};
pub use tracker::{ChatSimulator, MarketPoller};
pub use traits::{AssistantResponder, DashboardEventHandler, MarketDataProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
