//! A running dashboard session

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::config::DashboardConfig;
use crate::models::PlanTier;
use crate::notifications::NotificationQueue;
use crate::session::{Action, AppState, SendOutcome, SessionStore, Tab, Transition};
use crate::tracker::{ChatSimulator, MarketPoller};
use crate::traits::{AssistantResponder, DashboardEventHandler, MarketDataProvider};

/// One user's dashboard: shared state plus its background tasks.
///
/// Dropping the dashboard stops market polling and aborts undelivered
/// assistant replies.
pub struct Dashboard {
    store: SessionStore,
    poller: MarketPoller,
    chat: ChatSimulator,
    poll_task: JoinHandle<()>,
}

impl Dashboard {
    /// Start a session: the first market fetch is issued immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        config: &DashboardConfig,
        provider: Arc<dyn MarketDataProvider>,
        responder: Arc<dyn AssistantResponder>,
        handler: Arc<dyn DashboardEventHandler>,
    ) -> Self {
        let store = SessionStore::new(NotificationQueue::new(handler));
        let poller = MarketPoller::new(provider, store.clone(), config.poll_interval);
        let chat = ChatSimulator::new(store.clone(), responder, config.assistant_delay);
        let poll_task = poller.clone().spawn();

        info!("Dashboard session started");

        Self {
            store,
            poller,
            chat,
            poll_task,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub async fn state(&self) -> AppState {
        self.store.snapshot().await
    }

    pub async fn portfolio_total(&self) -> f64 {
        self.store.read(AppState::portfolio_total).await
    }

    pub async fn can_query(&self) -> bool {
        self.store.read(AppState::can_query).await
    }

    /// Send a message to the assistant
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        self.chat.send(text).await
    }

    /// Switch plan. Always succeeds and resets today's usage.
    pub async fn upgrade(&self, tier: PlanTier) {
        self.store.dispatch(Action::Upgrade(tier)).await;
    }

    pub async fn toggle_balances(&self) {
        self.store.dispatch(Action::ToggleBalances).await;
    }

    pub async fn select_tab(&self, tab: Tab) {
        self.store.dispatch(Action::SelectTab(tab)).await;
    }

    pub async fn open_upgrade_prompt(&self) {
        self.store.dispatch(Action::OpenUpgradePrompt).await;
    }

    pub async fn close_upgrade_prompt(&self) {
        self.store.dispatch(Action::CloseUpgradePrompt).await;
    }

    /// Track a holding at the asset's current market price
    pub async fn open_position(&self, symbol: &str, amount: f64) -> Transition {
        self.store
            .dispatch(Action::OpenPosition {
                symbol: symbol.to_string(),
                amount,
            })
            .await
    }

    /// Fetch market data now, outside the regular cadence
    pub async fn refresh_market(&self) -> bool {
        self.poller.refresh().await
    }

    /// Stop polling, cancel pending replies and flush the event queue
    pub async fn shutdown(&self) {
        self.poll_task.abort();
        self.chat.close().await;
        self.store.notifications().shutdown();
        info!("Dashboard session stopped");
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.poll_task.abort();
    }
}
