use std::fmt;
use std::str::FromStr;

use crate::models::{Asset, ChatMessage, PlanTier, Portfolio, Quota};

/// Dashboard tabs
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Market,
    Portfolio,
    Assistant,
    Plans,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tab::Market => "market",
            Tab::Portfolio => "portfolio",
            Tab::Assistant => "assistant",
            Tab::Plans => "plans",
        };
        f.write_str(label)
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "market" | "trading" => Ok(Tab::Market),
            "portfolio" => Ok(Tab::Portfolio),
            "assistant" | "chat" => Ok(Tab::Assistant),
            "plans" => Ok(Tab::Plans),
            other => Err(format!("Unknown tab '{}'", other)),
        }
    }
}

/// UI toggles that never touch market or plan data
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UiState {
    pub balances_hidden: bool,
    pub active_tab: Tab,
    pub upgrade_prompt_open: bool,
}

/// Whole in-memory session. Lost when the process exits.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub plan: PlanTier,
    pub queries_used: u32,
    pub chat: Vec<ChatMessage>,
    /// Assistant replies scheduled but not yet delivered
    pub pending_replies: usize,
    pub assets: Vec<Asset>,
    pub portfolio: Portfolio,
    pub loading: bool,
    pub ui: UiState,
    pub(crate) next_message_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            plan: PlanTier::Free,
            queries_used: 0,
            chat: Vec::new(),
            pending_replies: 0,
            assets: Vec::new(),
            portfolio: Portfolio::new(),
            loading: true,
            ui: UiState::default(),
            next_message_id: 1,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quota(&self) -> Quota {
        self.plan.quota()
    }

    /// Whether the assistant input is enabled
    pub fn can_query(&self) -> bool {
        self.quota().allows(self.queries_used)
    }

    pub fn is_typing(&self) -> bool {
        self.pending_replies > 0
    }

    pub fn portfolio_total(&self) -> f64 {
        self.portfolio.total_value()
    }

    pub fn find_asset(&self, symbol: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.matches_symbol(symbol))
    }

    /// "Unlimited queries" or "<used>/<limit> queries today"
    pub fn usage_label(&self) -> String {
        match self.quota() {
            Quota::Unlimited => "Unlimited queries".to_string(),
            Quota::Limited(limit) => format!("{}/{} queries today", self.queries_used, limit),
        }
    }

    pub(crate) fn take_message_id(&mut self) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }
}
