use async_trait::async_trait;

use crate::notifications::DashboardEvent;

/// Handler for dashboard events (toasts, assistant replies, market refreshes)
#[async_trait]
pub trait DashboardEventHandler: Send + Sync {
    /// Handle one dashboard event
    async fn handle_event(&self, event: DashboardEvent);
}
