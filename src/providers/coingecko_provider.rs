use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::models::asset::Asset;
use crate::traits::market_data_provider::MarketDataProvider;

/// Market data provider backed by the CoinGecko `coins/markets` endpoint
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    vs_currency: String,
    per_page: u32,
}

impl CoinGeckoProvider {
    /// Create a new provider from dashboard settings
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.http_timeout).build()?;

        Ok(Self {
            client,
            base_url: config.market_api_url.clone(),
            vs_currency: config.vs_currency.clone(),
            per_page: config.per_page,
        })
    }

    /// Endpoint URL, without query string
    pub fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }

    /// Query parameters for the first page ordered by market cap
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", self.vs_currency.clone()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", "1".to_string()),
            ("sparkline", "false".to_string()),
        ]
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    async fn fetch_top_assets(&self) -> Result<Vec<Asset>> {
        let url = self.markets_url();
        debug!("Fetching market snapshot from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&self.query_params())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Market API error: Status {}", status);
            return Err(DashboardError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let assets: Vec<Asset> = serde_json::from_str(&body)?;
        debug!("Decoded {} assets", assets.len());

        Ok(assets)
    }

    fn source_name(&self) -> &str {
        "coingecko"
    }
}
