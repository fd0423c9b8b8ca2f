//! Session state transitions
//!
//! Every mutation of [`AppState`] goes through [`reduce`]. The reducer is
//! synchronous and performs no I/O: side effects are described by the
//! returned [`Transition`] and carried out by the caller.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::state::{AppState, Tab};
use crate::models::{Asset, ChatMessage, PlanTier, Position};
use crate::notifications::{DashboardEvent, Toast};

pub const MARKET_LOAD_FAILED: &str = "Failed to load cryptocurrency data";
pub const QUOTA_EXHAUSTED: &str = "Query limit reached! Upgrade your plan.";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A poll returned a fresh asset list
    MarketLoaded(Vec<Asset>),
    /// A poll failed; the payload is the error text
    MarketFailed(String),
    Upgrade(PlanTier),
    SendMessage { text: String, at: DateTime<Utc> },
    AssistantReplied { content: String, at: DateTime<Utc> },
    /// Scheduled replies that were aborted before delivery
    RepliesCancelled(usize),
    ToggleBalances,
    SelectTab(Tab),
    OpenUpgradePrompt,
    CloseUpgradePrompt,
    /// Record a holding priced at the asset's current market price
    OpenPosition { symbol: String, amount: f64 },
}

/// Result of a send attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// User message appended; a reply must be scheduled
    Accepted { message_id: u64 },
    /// Blank input, nothing happened
    Ignored,
    /// Quota gate denied the query
    QuotaExceeded,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Transition {
    pub events: Vec<DashboardEvent>,
    pub send: Option<SendOutcome>,
}

impl Transition {
    fn with_event(event: DashboardEvent) -> Self {
        Self {
            events: vec![event],
            send: None,
        }
    }

    /// Whether a send attempt was accepted and needs a delayed reply
    pub fn reply_needed(&self) -> bool {
        matches!(self.send, Some(SendOutcome::Accepted { .. }))
    }
}

/// Apply one action to the session state
pub fn reduce(state: &mut AppState, action: Action) -> Transition {
    match action {
        Action::MarketLoaded(assets) => {
            let report = state.portfolio.reconcile(&assets);
            for change in &report.changes {
                debug!(
                    "{} repriced {:.8} → {:.8} ({:+.2}%)",
                    change.symbol, change.old_price, change.new_price, change.percentage_change
                );
            }

            let count = assets.len();
            state.assets = assets;
            state.loading = false;

            Transition::with_event(DashboardEvent::MarketRefreshed {
                assets: count,
                repriced: report.changes.len(),
            })
        }

        Action::MarketFailed(reason) => {
            debug!("Keeping last market snapshot after failure: {}", reason);
            state.loading = false;
            Transition::with_event(DashboardEvent::Toast(Toast::error(MARKET_LOAD_FAILED)))
        }

        Action::Upgrade(tier) => {
            info!("Plan change {} → {}", state.plan, tier);
            state.plan = tier;
            state.queries_used = 0;
            state.ui.upgrade_prompt_open = false;
            Transition::with_event(DashboardEvent::Toast(Toast::success(format!(
                "{} plan activated successfully!",
                tier.name()
            ))))
        }

        Action::SendMessage { text, at } => send_message(state, &text, at),

        Action::AssistantReplied { content, at } => {
            let id = state.take_message_id();
            let message = ChatMessage::assistant(id, &content, at);
            state.chat.push(message.clone());
            state.pending_replies = state.pending_replies.saturating_sub(1);
            Transition::with_event(DashboardEvent::AssistantReplied(message))
        }

        Action::RepliesCancelled(count) => {
            state.pending_replies = state.pending_replies.saturating_sub(count);
            Transition::default()
        }

        Action::ToggleBalances => {
            state.ui.balances_hidden = !state.ui.balances_hidden;
            Transition::default()
        }

        Action::SelectTab(tab) => {
            state.ui.active_tab = tab;
            Transition::default()
        }

        Action::OpenUpgradePrompt => {
            state.ui.upgrade_prompt_open = true;
            Transition::with_event(DashboardEvent::UpgradePromptOpened)
        }

        Action::CloseUpgradePrompt => {
            state.ui.upgrade_prompt_open = false;
            Transition::default()
        }

        Action::OpenPosition { symbol, amount } => open_position(state, &symbol, amount),
    }
}

fn send_message(state: &mut AppState, text: &str, at: DateTime<Utc>) -> Transition {
    if text.trim().is_empty() {
        return Transition {
            events: vec![],
            send: Some(SendOutcome::Ignored),
        };
    }

    if !state.can_query() {
        info!(
            "Query denied on {} plan ({})",
            state.plan,
            state.usage_label()
        );
        state.ui.upgrade_prompt_open = true;
        return Transition {
            events: vec![
                DashboardEvent::Toast(Toast::error(QUOTA_EXHAUSTED)),
                DashboardEvent::UpgradePromptOpened,
            ],
            send: Some(SendOutcome::QuotaExceeded),
        };
    }

    let message_id = state.take_message_id();
    state.chat.push(ChatMessage::user(message_id, text, at));
    state.queries_used = state.queries_used.saturating_add(1);
    state.pending_replies += 1;

    Transition {
        events: vec![],
        send: Some(SendOutcome::Accepted { message_id }),
    }
}

fn open_position(state: &mut AppState, symbol: &str, amount: f64) -> Transition {
    if !amount.is_finite() || amount <= 0.0 {
        return Transition::with_event(DashboardEvent::Toast(Toast::warning(format!(
            "Invalid amount {} for {}",
            amount,
            symbol.to_uppercase()
        ))));
    }

    let Some(asset) = state.find_asset(symbol) else {
        return Transition::with_event(DashboardEvent::Toast(Toast::warning(format!(
            "{} is not in the current market list",
            symbol.to_uppercase()
        ))));
    };

    let position = Position::new(&asset.symbol, &asset.name, amount, asset.current_price);
    let label = asset.display_symbol();
    state.portfolio.open(position);

    Transition::with_event(DashboardEvent::Toast(Toast::success(format!(
        "Added {} {} to portfolio",
        amount, label
    ))))
}
