use serde::{Deserialize, Serialize};

use super::asset::Asset;

/// A held quantity of one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub amount: f64,
    pub buy_price: f64,
    pub current_price: f64,
}

impl Position {
    /// Create a new position priced at its acquisition price
    pub fn new(symbol: &str, name: &str, amount: f64, buy_price: f64) -> Self {
        Self {
            id: symbol.to_lowercase(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            amount,
            buy_price,
            current_price: buy_price,
        }
    }

    /// Current market value of the holding
    pub fn value(&self) -> f64 {
        self.amount * self.current_price
    }

    /// Unrealized profit or loss against the acquisition price
    pub fn profit_loss(&self) -> f64 {
        (self.current_price - self.buy_price) * self.amount
    }

    pub fn profit_loss_percentage(&self) -> f64 {
        if self.buy_price > 0.0 {
            (self.current_price - self.buy_price) / self.buy_price * 100.0
        } else {
            0.0
        }
    }
}

/// Held positions, in insertion order
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    positions: Vec<Position>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Add a position, merging into an existing one with the same symbol.
    ///
    /// A merge keeps the amount-weighted average acquisition price.
    pub fn open(&mut self, position: Position) {
        match self
            .positions
            .iter_mut()
            .find(|p| p.symbol.eq_ignore_ascii_case(&position.symbol))
        {
            Some(existing) => {
                let total_amount = existing.amount + position.amount;
                if total_amount > 0.0 {
                    existing.buy_price = (existing.amount * existing.buy_price
                        + position.amount * position.buy_price)
                        / total_amount;
                }
                existing.amount = total_amount;
                existing.current_price = position.current_price;
            }
            None => self.positions.push(position),
        }
    }

    /// Sum of `amount * current_price` over every position
    pub fn total_value(&self) -> f64 {
        self.positions.iter().map(Position::value).sum()
    }

    pub fn total_profit_loss(&self) -> f64 {
        self.positions.iter().map(Position::profit_loss).sum()
    }

    /// Refresh current prices from a fresh asset list.
    ///
    /// Positions are matched by symbol, ignoring case. Positions with no
    /// matching asset keep their previous price.
    pub fn reconcile(&mut self, assets: &[Asset]) -> PriceReconciliation {
        let mut report = PriceReconciliation::default();

        for position in &mut self.positions {
            match assets.iter().find(|a| a.matches_symbol(&position.symbol)) {
                Some(asset) => {
                    let old_price = position.current_price;
                    position.current_price = asset.current_price;
                    if (asset.current_price - old_price).abs() > f64::EPSILON {
                        report
                            .changes
                            .push(PriceChange::new(&position.symbol, old_price, asset.current_price));
                    }
                }
                None => report.unmatched.push(position.symbol.clone()),
            }
        }

        report
    }
}

/// Outcome of reconciling positions against a fresh asset list
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PriceReconciliation {
    pub changes: Vec<PriceChange>,
    pub unmatched: Vec<String>,
}

impl PriceReconciliation {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.unmatched.is_empty()
    }
}

/// Price movement of one position between two polls
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChange {
    pub symbol: String,
    pub old_price: f64,
    pub new_price: f64,
    pub change: f64,
    pub percentage_change: f64,
}

impl PriceChange {
    pub fn new(symbol: &str, old_price: f64, new_price: f64) -> Self {
        let change = new_price - old_price;
        let percentage_change = if old_price > 0.0 {
            (change / old_price) * 100.0
        } else {
            100.0
        };

        Self {
            symbol: symbol.to_string(),
            old_price,
            new_price,
            change,
            percentage_change,
        }
    }
}
