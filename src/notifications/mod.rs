//! User-visible events and the async queue that delivers them to handlers

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{error, warn};

use crate::models::chat::ChatMessage;
use crate::traits::event_handler::DashboardEventHandler;

/// Severity of a transient toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ToastLevel::Success => "success",
            ToastLevel::Warning => "warning",
            ToastLevel::Error => "error",
        };
        f.write_str(label)
    }
}

/// A transient, non-blocking user notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(ToastLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(ToastLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(ToastLevel::Error, message)
    }

    fn with_level(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Something the front end should react to
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Toast(Toast),
    AssistantReplied(ChatMessage),
    MarketRefreshed { assets: usize, repriced: usize },
    UpgradePromptOpened,
}

enum QueueItem {
    Event(DashboardEvent),
    Shutdown,
}

/// Event queue for async delivery
pub struct NotificationQueue {
    sender: UnboundedSender<QueueItem>,
}

impl NotificationQueue {
    /// Create a new queue and spawn its delivery task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(handler: Arc<dyn DashboardEventHandler>) -> Self {
        let (sender, receiver) = unbounded_channel();

        tokio::spawn(Self::process_events(receiver, handler));

        Self { sender }
    }

    async fn process_events(
        mut receiver: UnboundedReceiver<QueueItem>,
        handler: Arc<dyn DashboardEventHandler>,
    ) {
        while let Some(item) = receiver.recv().await {
            match item {
                QueueItem::Event(event) => handler.handle_event(event).await,
                QueueItem::Shutdown => {
                    warn!("Notification processor shutting down");
                    break;
                }
            }
        }
    }

    /// Queue an event (non-blocking)
    pub fn notify(&self, event: DashboardEvent) {
        if self.sender.send(QueueItem::Event(event)).is_err() {
            error!("Failed to queue dashboard event: processor stopped");
        }
    }

    /// Stop the delivery task once already queued events are handled
    pub fn shutdown(&self) {
        // A closed channel means the processor is already gone.
        let _ = self.sender.send(QueueItem::Shutdown);
    }
}

impl Clone for NotificationQueue {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
