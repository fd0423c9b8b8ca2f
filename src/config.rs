//! Environment-driven configuration

use std::str::FromStr;
use std::time::Duration;

use crate::error::{DashboardError, Result};

pub const DEFAULT_MARKET_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;
pub const DEFAULT_ASSISTANT_DELAY_MS: u64 = 2_000;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Runtime settings for a dashboard session
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub market_api_url: String,
    pub vs_currency: String,
    pub per_page: u32,
    pub poll_interval: Duration,
    pub assistant_delay: Duration,
    pub http_timeout: Duration,
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            market_api_url: DEFAULT_MARKET_API_URL.to_string(),
            vs_currency: "usd".to_string(),
            per_page: DEFAULT_PER_PAGE,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            assistant_delay: Duration::from_millis(DEFAULT_ASSISTANT_DELAY_MS),
            http_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load settings from the process environment, falling back to defaults.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let per_page: u32 = parse_or(&lookup, "MARKET_PER_PAGE", defaults.per_page)?;
        if per_page == 0 {
            return Err(DashboardError::Config(
                "MARKET_PER_PAGE must be greater than zero".to_string(),
            ));
        }

        let poll_ms = parse_or(&lookup, "POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?;
        if poll_ms == 0 {
            return Err(DashboardError::Config(
                "POLL_INTERVAL_MS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            market_api_url: lookup("MARKET_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.market_api_url),
            vs_currency: lookup("MARKET_VS_CURRENCY")
                .map(|c| c.to_lowercase())
                .unwrap_or(defaults.vs_currency),
            per_page,
            poll_interval: Duration::from_millis(poll_ms),
            assistant_delay: Duration::from_millis(parse_or(
                &lookup,
                "ASSISTANT_DELAY_MS",
                DEFAULT_ASSISTANT_DELAY_MS,
            )?),
            http_timeout: Duration::from_millis(parse_or(
                &lookup,
                "HTTP_TIMEOUT_MS",
                DEFAULT_HTTP_TIMEOUT_MS,
            )?),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| DashboardError::Config(format!("Invalid {} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = DashboardConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.market_api_url, DEFAULT_MARKET_API_URL);
        assert_eq!(config.vs_currency, "usd");
        assert_eq!(config.per_page, 50);
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.assistant_delay, Duration::from_secs(2));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            ("MARKET_API_URL", "http://localhost:9000/api/"),
            ("MARKET_VS_CURRENCY", "EUR"),
            ("POLL_INTERVAL_MS", "5000"),
            ("ASSISTANT_DELAY_MS", "10"),
        ]))
        .unwrap();

        assert_eq!(config.market_api_url, "http://localhost:9000/api");
        assert_eq!(config.vs_currency, "eur");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.assistant_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let err = DashboardConfig::from_lookup(lookup_from(&[("POLL_INTERVAL_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));

        let err = DashboardConfig::from_lookup(lookup_from(&[("MARKET_PER_PAGE", "0")]))
            .unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }
}
