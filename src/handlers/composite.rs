use std::sync::Arc;

use async_trait::async_trait;

use crate::notifications::DashboardEvent;
use crate::traits::event_handler::DashboardEventHandler;

/// Composite event handler that fans events out to several handlers
pub struct CompositeEventHandler {
    handlers: Vec<Arc<dyn DashboardEventHandler>>,
}

impl CompositeEventHandler {
    /// Create a new composite event handler
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Add a handler to the composite
    pub fn add_handler(&mut self, handler: Arc<dyn DashboardEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for CompositeEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DashboardEventHandler for CompositeEventHandler {
    async fn handle_event(&self, event: DashboardEvent) {
        for handler in &self.handlers {
            handler.handle_event(event.clone()).await;
        }
    }
}
