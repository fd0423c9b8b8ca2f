use serde::{Deserialize, Deserializer, Serialize};

/// Market snapshot of one tracked asset, as returned by the markets endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub current_price: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub price_change_percentage_24h: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub market_cap: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_volume: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
}

impl Asset {
    /// Create a new asset snapshot
    pub fn new(id: &str, symbol: &str, name: &str, current_price: f64) -> Self {
        Self {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            current_price,
            price_change_percentage_24h: 0.0,
            market_cap: 0.0,
            total_volume: 0.0,
            image: String::new(),
        }
    }

    /// Case-insensitive symbol comparison
    pub fn matches_symbol(&self, symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(symbol)
    }

    /// Symbol as shown in listings
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }

    pub fn is_gaining(&self) -> bool {
        self.price_change_percentage_24h >= 0.0
    }
}

// Thin assets come back with `null` for some numeric fields.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
