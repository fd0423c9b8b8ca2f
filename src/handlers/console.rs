use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::notifications::{DashboardEvent, ToastLevel};
use crate::traits::event_handler::DashboardEventHandler;

/// Console logging event handler
pub struct ConsoleEventHandler;

impl ConsoleEventHandler {
    /// Create a new console event handler
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DashboardEventHandler for ConsoleEventHandler {
    async fn handle_event(&self, event: DashboardEvent) {
        match event {
            DashboardEvent::Toast(toast) => match toast.level {
                ToastLevel::Success => info!("✅ {}", toast.message),
                ToastLevel::Warning => warn!("⚠️  {}", toast.message),
                ToastLevel::Error => error!("❌ {}", toast.message),
            },
            DashboardEvent::AssistantReplied(message) => {
                info!("{}", "-".repeat(80));
                info!("🤖 Assistant: {}", message.content);
                info!("{}", "-".repeat(80));
            }
            DashboardEvent::MarketRefreshed { assets, repriced } => {
                debug!(
                    "Market refreshed: {} assets, {} positions repriced",
                    assets, repriced
                );
            }
            DashboardEvent::UpgradePromptOpened => {
                info!("Upgrade to Pro or Premium to keep using the assistant (/upgrade pro | /upgrade premium)");
            }
        }
    }
}
