//! Market-related models

use crate::types::format_usd_grouped;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response from /simple/price, keyed by coin id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimplePriceResponse(pub HashMap<String, CurrencyQuote>);

/// Quote for a single coin. Only `usd` is requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrencyQuote {
    #[serde(default)]
    pub usd: Option<serde_json::Number>,
}

impl SimplePriceResponse {
    pub fn usd(&self, coin_id: &str) -> Option<&serde_json::Number> {
        self.0.get(coin_id).and_then(|q| q.usd.as_ref())
    }

    /// USD price as written by the API, or `N/A` when the coin is absent
    pub fn price_text(&self, coin_id: &str) -> String {
        self.usd(coin_id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Response from /global
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalResponse {
    pub data: GlobalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalData {
    #[serde(default)]
    pub active_cryptocurrencies: Option<u64>,
    #[serde(default)]
    pub total_market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap_change_percentage_24h_usd: Option<f64>,
}

/// Aggregate market totals in USD
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalMarket {
    pub total_volume_usd: Option<f64>,
    pub total_market_cap_usd: Option<f64>,
    pub active_cryptocurrencies: Option<u64>,
    pub market_cap_change_24h: Option<f64>,
}

impl From<GlobalResponse> for GlobalMarket {
    fn from(resp: GlobalResponse) -> Self {
        let data = resp.data;
        Self {
            total_volume_usd: data.total_volume.get("usd").copied(),
            total_market_cap_usd: data.total_market_cap.get("usd").copied(),
            active_cryptocurrencies: data.active_cryptocurrencies,
            market_cap_change_24h: data.market_cap_change_percentage_24h_usd,
        }
    }
}

impl GlobalMarket {
    pub fn volume_label(&self) -> String {
        format!("Total market volume: {}", usd_or_na(self.total_volume_usd))
    }

    pub fn market_cap_label(&self) -> String {
        format!("Global market cap: {}", usd_or_na(self.total_market_cap_usd))
    }
}

fn usd_or_na(value: Option<f64>) -> String {
    value
        .map(format_usd_grouped)
        .unwrap_or_else(|| "N/A".to_string())
}
