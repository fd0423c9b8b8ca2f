use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crypto_genius::{
    Asset, AssistantResponder, Dashboard, DashboardConfig, DashboardError, DashboardEvent,
    DashboardEventHandler, MarketDataProvider, PlanTier, Quota, SendOutcome, ToastLevel,
};

#[derive(Default)]
struct RecordingHandler {
    events: Mutex<Vec<DashboardEvent>>,
}

impl RecordingHandler {
    fn toasts(&self, level: ToastLevel) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                DashboardEvent::Toast(t) if t.level == level => Some(t.message.clone()),
                _ => None,
            })
            .collect()
    }

    fn replies(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, DashboardEvent::AssistantReplied(_)))
            .count()
    }
}

#[async_trait]
impl DashboardEventHandler for RecordingHandler {
    async fn handle_event(&self, event: DashboardEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Returns a fixed market, or fails while `failing` is set
struct ScriptedMarket {
    assets: Vec<Asset>,
    failing: std::sync::atomic::AtomicBool,
    calls: AtomicUsize,
}

impl ScriptedMarket {
    fn new(assets: Vec<Asset>) -> Self {
        Self {
            assets,
            failing: std::sync::atomic::AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MarketDataProvider for ScriptedMarket {
    async fn fetch_top_assets(&self) -> crypto_genius::Result<Vec<Asset>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DashboardError::Status {
                status: 429,
                body: "rate limited".to_string(),
            });
        }
        Ok(self.assets.clone())
    }
}

struct EchoResponder;

impl AssistantResponder for EchoResponder {
    fn respond(&self, prompt: &str) -> String {
        format!("re: {}", prompt)
    }
}

fn market() -> Vec<Asset> {
    vec![
        Asset::new("bitcoin", "btc", "Bitcoin", 65000.0),
        Asset::new("ethereum", "eth", "Ethereum", 3000.0),
    ]
}

fn start(provider: Arc<ScriptedMarket>) -> (Dashboard, Arc<RecordingHandler>) {
    let handler = Arc::new(RecordingHandler::default());
    let dashboard = Dashboard::start(
        &DashboardConfig::default(),
        provider,
        Arc::new(EchoResponder),
        handler.clone(),
    );
    (dashboard, handler)
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

#[tokio::test(start_paused = true)]
async fn free_plan_exhaustion_then_premium_upgrade() {
    let (dashboard, handler) = start(Arc::new(ScriptedMarket::new(market())));
    settle().await;

    for i in 0..5 {
        let outcome = dashboard.send_message(&format!("question {}", i)).await;
        assert!(matches!(outcome, SendOutcome::Accepted { .. }));
    }
    assert!(!dashboard.can_query().await);

    assert_eq!(dashboard.send_message("hi").await, SendOutcome::QuotaExceeded);
    let state = dashboard.state().await;
    assert_eq!(state.queries_used, 5);
    assert_eq!(state.chat.len(), 5);
    assert!(state.ui.upgrade_prompt_open);

    dashboard.upgrade(PlanTier::Premium).await;
    let state = dashboard.state().await;
    assert_eq!(state.queries_used, 0);
    assert_eq!(state.quota(), Quota::Unlimited);
    assert!(!state.ui.upgrade_prompt_open);

    for _ in 0..20 {
        assert!(matches!(
            dashboard.send_message("more").await,
            SendOutcome::Accepted { .. }
        ));
    }

    tokio::time::sleep(Duration::from_secs(3)).await;
    let state = dashboard.state().await;
    assert_eq!(state.chat.len(), 50);
    assert!(!state.is_typing());
    assert_eq!(handler.replies(), 25);
    assert_eq!(
        handler.toasts(ToastLevel::Error),
        vec!["Query limit reached! Upgrade your plan.".to_string()]
    );
    assert!(handler.toasts(ToastLevel::Warning).is_empty());
    assert_eq!(
        handler.toasts(ToastLevel::Success),
        vec!["Premium plan activated successfully!".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn positions_follow_market_and_survive_failures() {
    let provider = Arc::new(ScriptedMarket::new(market()));
    let (dashboard, handler) = start(provider.clone());
    settle().await;

    assert!(!dashboard.state().await.loading);
    dashboard.open_position("BTC", 0.5).await;
    dashboard.open_position("eth", 2.0).await;
    assert_eq!(dashboard.portfolio_total().await, 0.5 * 65000.0 + 2.0 * 3000.0);

    provider.failing.store(true, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(30)).await;
    settle().await;

    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    let state = dashboard.state().await;
    assert_eq!(state.assets.len(), 2);
    assert_eq!(dashboard.portfolio_total().await, 38500.0);
    assert_eq!(
        handler.toasts(ToastLevel::Error),
        vec!["Failed to load cryptocurrency data".to_string()]
    );

    provider.failing.store(false, Ordering::SeqCst);
    assert!(dashboard.refresh_market().await);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_polling_and_pending_replies() {
    let provider = Arc::new(ScriptedMarket::new(market()));
    let (dashboard, handler) = start(provider.clone());
    settle().await;

    dashboard.send_message("anyone there?").await;
    dashboard.shutdown().await;

    tokio::time::sleep(Duration::from_secs(120)).await;

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    let state = dashboard.state().await;
    assert_eq!(state.chat.len(), 1);
    assert_eq!(state.pending_replies, 0);
    assert!(!state.is_typing());
    assert_eq!(handler.replies(), 0);

    assert_eq!(dashboard.send_message("still there?").await, SendOutcome::Ignored);
    assert_eq!(dashboard.state().await.queries_used, 1);
}
