//! Dashboard error types

use thiserror::Error;

/// Errors raised by the dashboard library.
///
/// Only the market data fetch and configuration loading can fail; quota
/// exhaustion is a regular state transition and never shows up here.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Market API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
