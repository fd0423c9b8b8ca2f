use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::session::{Action, SessionStore};
use crate::traits::market_data_provider::MarketDataProvider;

/// Periodic market snapshot refresher
#[derive(Clone)]
pub struct MarketPoller {
    provider: Arc<dyn MarketDataProvider>,
    store: SessionStore,
    poll_interval: Duration,
}

impl MarketPoller {
    /// Create a new market poller
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        store: SessionStore,
        poll_interval: Duration,
    ) -> Self {
        Self {
            provider,
            store,
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Fetch once and apply the result. Returns whether the fetch succeeded.
    pub async fn refresh(&self) -> bool {
        refresh_once(self.provider.as_ref(), &self.store).await
    }

    /// Poll immediately, then on every interval tick, forever.
    ///
    /// Each fetch runs in its own task so a slow or hung request never
    /// delays the next tick. Overlapping requests are not de-duplicated.
    pub async fn run(self) {
        info!(
            "Starting market polling via {} with interval: {}ms",
            self.provider.source_name(),
            self.poll_interval.as_millis()
        );

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut in_flight = JoinSet::new();

        loop {
            ticker.tick().await;

            while in_flight.try_join_next().is_some() {}
            if !in_flight.is_empty() {
                debug!("{} market request(s) still in flight", in_flight.len());
            }

            let provider = self.provider.clone();
            let store = self.store.clone();
            in_flight.spawn(async move {
                refresh_once(provider.as_ref(), &store).await;
            });
        }
    }

    /// Run the poll loop on the runtime. Aborting the handle also aborts
    /// any fetch still in flight.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

async fn refresh_once(provider: &dyn MarketDataProvider, store: &SessionStore) -> bool {
    match provider.fetch_top_assets().await {
        Ok(assets) => {
            debug!("Market snapshot with {} assets", assets.len());
            store.dispatch(Action::MarketLoaded(assets)).await;
            true
        }
        Err(e) => {
            error!("Error fetching market data: {}", e);
            store.dispatch(Action::MarketFailed(e.to_string())).await;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::error::{DashboardError, Result};
    use crate::models::{Asset, Position};
    use crate::notifications::{DashboardEvent, NotificationQueue};
    use crate::session::AppState;
    use crate::traits::event_handler::DashboardEventHandler;

    struct NullHandler;

    #[async_trait]
    impl DashboardEventHandler for NullHandler {
        async fn handle_event(&self, _event: DashboardEvent) {}
    }

    /// Serves a rising BTC price and fails every third call
    struct FlakyProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MarketDataProvider for FlakyProvider {
        async fn fetch_top_assets(&self) -> Result<Vec<Asset>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call % 3 == 0 {
                return Err(DashboardError::Config("boom".to_string()));
            }
            Ok(vec![Asset::new("bitcoin", "BTC", "Bitcoin", 1000.0 * call as f64)])
        }
    }

    fn store_with_btc_position() -> SessionStore {
        let mut state = AppState::new();
        state.portfolio.open(Position::new("btc", "Bitcoin", 1.0, 100.0));
        SessionStore::with_state(state, NotificationQueue::new(Arc::new(NullHandler)))
    }

    #[tokio::test]
    async fn test_refresh_applies_snapshot_then_keeps_it_on_failure() {
        let store = store_with_btc_position();
        let provider = Arc::new(FlakyProvider {
            calls: AtomicUsize::new(0),
        });
        let poller = MarketPoller::new(provider, store.clone(), Duration::from_secs(30));

        assert!(poller.refresh().await);
        assert!(poller.refresh().await);
        assert!(!poller.refresh().await);

        let state = store.snapshot().await;
        assert!(!state.loading);
        assert_eq!(state.assets[0].current_price, 2000.0);
        assert_eq!(state.portfolio.positions()[0].current_price, 2000.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_polls_on_fixed_cadence_through_failures() {
        let store = store_with_btc_position();
        let provider = Arc::new(FlakyProvider {
            calls: AtomicUsize::new(0),
        });
        let handle = MarketPoller::new(provider.clone(), store.clone(), Duration::from_secs(30))
            .spawn();

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(90)).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);

        // The third call failed, the fourth succeeded again.
        let state = store.snapshot().await;
        assert_eq!(state.portfolio.positions()[0].current_price, 4000.0);

        handle.abort();
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
    }
}
