//! Mock FTSO price feed.
//!
//! Static quotes only; nothing here talks to a network.

use serde::{Deserialize, Serialize};

use super::DEFAULT_CLAIM_MULTIPLIER;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub symbol: String,
    pub price_usd: f64,
    /// 24h change in percent
    pub change_pct: f64,
}

impl PriceQuote {
    fn new(symbol: &str, price_usd: f64, change_pct: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            price_usd,
            change_pct,
        }
    }
}

/// Quotes plus the claim multiplier they are said to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceFeed {
    pub quotes: Vec<PriceQuote>,
    pub claim_multiplier: f64,
}

impl PriceFeed {
    pub fn mock(claim_multiplier: f64) -> Self {
        Self {
            quotes: vec![
                PriceQuote::new("BTC", 45230.0, 2.3),
                PriceQuote::new("ETH", 2890.0, -1.2),
                PriceQuote::new("FLR", 0.045, 5.7),
            ],
            claim_multiplier,
        }
    }

    pub fn quote(&self, symbol: &str) -> Option<&PriceQuote> {
        self.quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol))
    }
}

impl Default for PriceFeed {
    fn default() -> Self {
        Self::mock(DEFAULT_CLAIM_MULTIPLIER)
    }
}
