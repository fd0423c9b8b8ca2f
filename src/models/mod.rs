//! Data models for the dashboard

pub mod asset;
pub mod chat;
pub mod plan;
pub mod portfolio;

// Re-export for convenience
pub use asset::Asset;
pub use chat::{ChatMessage, ChatRole};
pub use plan::{can_query, Plan, PlanTier, Quota, FEATURE_MATRIX, PLANS};
pub use portfolio::{Portfolio, Position, PriceChange, PriceReconciliation};
