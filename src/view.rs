//! Plain-text rendering of the dashboard tabs

use std::fmt::Write;

use crate::models::{ChatRole, PlanTier, Quota, FEATURE_MATRIX};
use crate::session::{AppState, Tab};
use crate::utils::{format_compact, format_currency, format_masked, format_percent, truncate_string};

/// Number of assets listed on the market tab
pub const MARKET_LISTING_SIZE: usize = 15;

/// Header line with plan badge and portfolio total
pub fn render_header(state: &AppState) -> String {
    format!(
        "CryptoGenius AI  [{}]  Portfolio Total: {}",
        state.plan.name().to_uppercase(),
        format_masked(state.portfolio_total(), state.ui.balances_hidden)
    )
}

/// Render whichever tab is active
pub fn render_active_tab(state: &AppState) -> String {
    match state.ui.active_tab {
        Tab::Market => render_market(state),
        Tab::Portfolio => render_portfolio(state),
        Tab::Assistant => render_assistant(state),
        Tab::Plans => render_plans(state),
    }
}

pub fn render_market(state: &AppState) -> String {
    if state.loading {
        return "Loading market data...".to_string();
    }
    if state.assets.is_empty() {
        return "No market data available".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "TOP {} BY MARKET CAP", MARKET_LISTING_SIZE);
    let _ = writeln!(out, "{}", "-".repeat(80));

    for (i, asset) in state.assets.iter().take(MARKET_LISTING_SIZE).enumerate() {
        let arrow = if asset.is_gaining() { "▲" } else { "▼" };
        let _ = writeln!(
            out,
            "{:>2}. {:<6} {:<20} {:>16} {} {:>8}  cap {}",
            i + 1,
            asset.display_symbol(),
            truncate_string(&asset.name, 20),
            format_currency(asset.current_price),
            arrow,
            format_percent(asset.price_change_percentage_24h),
            format_compact(asset.market_cap),
        );
    }

    let _ = write!(out, "{}", "=".repeat(80));
    out
}

pub fn render_portfolio(state: &AppState) -> String {
    let hidden = state.ui.balances_hidden;

    if state.portfolio.is_empty() {
        return "Portfolio is empty. Use /hold SYMBOL AMOUNT to track a holding.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "PORTFOLIO");
    let _ = writeln!(out, "{}", "-".repeat(80));

    for position in state.portfolio.positions() {
        let _ = writeln!(
            out,
            "{:<6} {} coins  value {}  ({} each, P/L {} {})",
            position.symbol.to_uppercase(),
            position.amount,
            format_masked(position.value(), hidden),
            format_currency(position.current_price),
            format_masked(position.profit_loss(), hidden),
            format_percent(position.profit_loss_percentage()),
        );
    }

    let _ = writeln!(out, "{}", "-".repeat(80));
    let _ = write!(
        out,
        "➤ Total Portfolio Value: {}",
        format_masked(state.portfolio_total(), hidden)
    );
    out
}

pub fn render_assistant(state: &AppState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AI Assistant ({})", state.usage_label());

    if state.chat.is_empty() {
        let _ = writeln!(out, "Ask anything about the crypto market.");
    }
    for message in &state.chat {
        let who = match message.role {
            ChatRole::User => "You",
            ChatRole::Assistant => "AI",
        };
        let _ = writeln!(
            out,
            "[{}] {}: {}",
            message.timestamp.format("%H:%M:%S"),
            who,
            message.content
        );
    }

    if state.is_typing() {
        let _ = writeln!(out, "AI is typing...");
    }
    if !state.can_query() {
        let _ = writeln!(out, "Upgrade your plan to keep using the assistant.");
    }

    out.trim_end().to_string()
}

pub fn render_plans(state: &AppState) -> String {
    let mut out = String::new();

    for tier in PlanTier::ALL {
        let plan = tier.plan();
        let marker = if tier == state.plan { " (current)" } else { "" };
        let _ = writeln!(
            out,
            "{} - ${}/month{}",
            plan.name, plan.monthly_price_usd, marker
        );
        for feature in plan.features {
            let _ = writeln!(out, "  ✓ {}", feature);
        }
    }

    let _ = writeln!(out, "{}", "-".repeat(80));
    let _ = writeln!(out, "{:<24} {:>9} {:>9} {:>9}", "Feature", "Free", "Pro", "Premium");

    let quotas: Vec<String> = PlanTier::ALL
        .iter()
        .map(|tier| match tier.quota() {
            Quota::Limited(n) => n.to_string(),
            Quota::Unlimited => "Unlimited".to_string(),
        })
        .collect();
    let _ = writeln!(
        out,
        "{:<24} {:>9} {:>9} {:>9}",
        "AI queries per day", quotas[0], quotas[1], quotas[2]
    );

    for (feature, available) in FEATURE_MATRIX.iter() {
        let marks: Vec<&str> = available.iter().map(|&a| if a { "✓" } else { "✗" }).collect();
        let _ = writeln!(
            out,
            "{:<24} {:>9} {:>9} {:>9}",
            feature, marks[0], marks[1], marks[2]
        );
    }

    out.trim_end().to_string()
}
