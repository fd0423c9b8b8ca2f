use async_trait::async_trait;

use crate::error::Result;
use crate::models::asset::Asset;

/// Trait for market data feeds
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch the current top assets by market capitalization, largest first
    async fn fetch_top_assets(&self) -> Result<Vec<Asset>>;

    /// Short name used in logs
    fn source_name(&self) -> &str {
        "market"
    }
}
