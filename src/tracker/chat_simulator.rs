use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::session::{Action, SendOutcome, SessionStore};
use crate::traits::responder::AssistantResponder;

/// Simulated assistant: gated sends with delayed canned replies
pub struct ChatSimulator {
    store: SessionStore,
    responder: Arc<dyn AssistantResponder>,
    reply_delay: Duration,
    pending: Mutex<JoinSet<()>>,
    /// Set by `close`; only read or written while `pending` is locked
    closed: AtomicBool,
}

impl ChatSimulator {
    pub fn new(
        store: SessionStore,
        responder: Arc<dyn AssistantResponder>,
        reply_delay: Duration,
    ) -> Self {
        Self {
            store,
            responder,
            reply_delay,
            pending: Mutex::new(JoinSet::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Send a user message.
    ///
    /// On acceptance the user message is already in the log when this
    /// returns; the reply lands after the configured delay. Sends are not
    /// serialized: each accepted one schedules its own reply. A closed
    /// simulator ignores sends.
    pub async fn send(&self, text: &str) -> SendOutcome {
        if self.is_closed() {
            debug!("Ignoring send on closed assistant");
            return SendOutcome::Ignored;
        }

        let transition = self
            .store
            .dispatch(Action::SendMessage {
                text: text.to_string(),
                at: Utc::now(),
            })
            .await;

        let outcome = transition.send.unwrap_or(SendOutcome::Ignored);
        if let SendOutcome::Accepted { message_id } = outcome {
            self.schedule_reply(text.to_string(), message_id).await;
        }

        outcome
    }

    async fn schedule_reply(&self, prompt: String, message_id: u64) {
        let store = self.store.clone();
        let responder = self.responder.clone();
        let delay = self.reply_delay;

        let mut pending = self.pending.lock().await;

        // Closed between the dispatch above and here.
        if self.closed.load(Ordering::SeqCst) {
            drop(pending);
            debug!("Dropping reply to message {}: assistant closed", message_id);
            self.store.dispatch(Action::RepliesCancelled(1)).await;
            return;
        }

        while pending.try_join_next().is_some() {}

        pending.spawn(async move {
            tokio::time::sleep(delay).await;
            let content = responder.respond(&prompt);
            debug!("Assistant replying to message {}", message_id);
            store
                .dispatch(Action::AssistantReplied {
                    content,
                    at: Utc::now(),
                })
                .await;
        });
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Replies scheduled and not yet delivered or cancelled
    pub async fn pending_count(&self) -> usize {
        let mut pending = self.pending.lock().await;
        while pending.try_join_next().is_some() {}
        pending.len()
    }

    /// Abort every reply that has not been delivered yet
    pub async fn cancel_pending(&self) {
        let mut pending = self.pending.lock().await;
        self.abort_all(&mut pending).await;
    }

    /// Cancel pending replies and refuse any further sends
    pub async fn close(&self) {
        let mut pending = self.pending.lock().await;
        self.closed.store(true, Ordering::SeqCst);
        self.abort_all(&mut pending).await;
    }

    async fn abort_all(&self, pending: &mut JoinSet<()>) {
        pending.abort_all();

        let mut cancelled = 0;
        while let Some(result) = pending.join_next().await {
            if matches!(result, Err(e) if e.is_cancelled()) {
                cancelled += 1;
            }
        }

        if cancelled > 0 {
            self.store
                .dispatch(Action::RepliesCancelled(cancelled))
                .await;
            info!("Cancelled {} pending assistant replies", cancelled);
        }
    }
}
