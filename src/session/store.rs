use std::sync::Arc;

use tokio::sync::Mutex;

use super::reducer::{self, Action, Transition};
use super::state::AppState;
use crate::notifications::NotificationQueue;

/// Shared handle to the session state.
///
/// Each dispatch applies one reducer call under the lock, then forwards the
/// emitted events to the notification queue.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<Mutex<AppState>>,
    notifications: NotificationQueue,
}

impl SessionStore {
    pub fn new(notifications: NotificationQueue) -> Self {
        Self::with_state(AppState::new(), notifications)
    }

    pub fn with_state(state: AppState, notifications: NotificationQueue) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            notifications,
        }
    }

    /// Apply an action and publish its events
    pub async fn dispatch(&self, action: Action) -> Transition {
        let transition = {
            let mut state = self.state.lock().await;
            reducer::reduce(&mut state, action)
        };

        for event in &transition.events {
            self.notifications.notify(event.clone());
        }

        transition
    }

    /// Clone of the current state
    pub async fn snapshot(&self) -> AppState {
        self.state.lock().await.clone()
    }

    /// Read a projection of the state without cloning all of it
    pub async fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        let state = self.state.lock().await;
        f(&state)
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }
}
