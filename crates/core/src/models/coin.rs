//! Coin-related models

use crate::types::{format_usd_grouped, Percent, Usd};
use serde::{Deserialize, Serialize};

/// Entry from /coins/markets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinSummary {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,
}

impl CoinSummary {
    /// Case-insensitive match against id, symbol and name. Empty query matches.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.id.to_lowercase().contains(&query)
            || self.symbol.to_lowercase().contains(&query)
            || self.name.to_lowercase().contains(&query)
    }

    pub fn change_24h(&self) -> Option<Percent> {
        self.price_change_percentage_24h.map(Percent::new)
    }

    pub fn price_label(&self) -> String {
        match self.current_price {
            Some(p) => Usd::new(p).grouped(),
            None => "N/A".to_string(),
        }
    }

    pub fn rank_label(&self) -> String {
        match self.market_cap_rank {
            Some(r) => format!("#{}", r),
            None => "#-".to_string(),
        }
    }

    pub fn market_cap_label(&self) -> String {
        self.market_cap
            .map(format_usd_grouped)
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Response from /coins/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinInfoResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub links: Option<CoinLinks>,
}

/// Localized description; only the English text is used
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub en: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinLinks {
    #[serde(default)]
    pub homepage: Vec<String>,
    #[serde(default)]
    pub twitter_screen_name: Option<String>,
    #[serde(default)]
    pub facebook_username: Option<String>,
    #[serde(default)]
    pub subreddit_url: Option<String>,
}

/// Description and social links for the selected coin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub reddit: Option<String>,
    pub homepage: Option<String>,
}

/// The API reports missing links as empty strings; treat those as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl From<CoinInfoResponse> for CoinInfo {
    fn from(resp: CoinInfoResponse) -> Self {
        let links = resp.links.unwrap_or_default();
        Self {
            id: resp.id,
            name: resp.name,
            description: resp
                .description
                .and_then(|d| d.en)
                .unwrap_or_default()
                .trim()
                .to_string(),
            twitter: non_empty(links.twitter_screen_name),
            facebook: non_empty(links.facebook_username),
            reddit: non_empty(links.subreddit_url),
            homepage: non_empty(links.homepage.into_iter().next()),
        }
    }
}

impl CoinInfo {
    pub fn twitter_url(&self) -> Option<String> {
        self.twitter.as_ref().map(|name| format!("https://x.com/{}", name))
    }

    pub fn facebook_url(&self) -> Option<String> {
        self.facebook
            .as_ref()
            .map(|name| format!("https://www.facebook.com/{}", name))
    }

    /// (label, url) pairs for every link the coin has
    pub fn social_links(&self) -> Vec<(&'static str, String)> {
        let mut links = Vec::new();
        if let Some(url) = self.twitter_url() {
            links.push(("Twitter", url));
        }
        if let Some(url) = self.facebook_url() {
            links.push(("Facebook", url));
        }
        if let Some(url) = &self.reddit {
            links.push(("Reddit", url.clone()));
        }
        if let Some(url) = &self.homepage {
            links.push(("Website", url.clone()));
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_summary() -> CoinSummary {
        serde_json::from_value(json!({
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            "current_price": 64123.5,
            "market_cap": 1262000000000.0,
            "market_cap_rank": 1,
            "total_volume": 31000000000.0,
            "high_24h": 65000.0,
            "low_24h": 63000.0,
            "price_change_percentage_24h": -1.25
        }))
        .unwrap()
    }

    #[test]
    fn test_summary_matches_query() {
        let coin = sample_summary();
        assert!(coin.matches(""));
        assert!(coin.matches("BTC"));
        assert!(coin.matches("bit"));
        assert!(coin.matches("  Bitcoin "));
        assert!(!coin.matches("eth"));
    }

    #[test]
    fn test_summary_labels() {
        let coin = sample_summary();
        assert_eq!(coin.rank_label(), "#1");
        assert_eq!(coin.price_label(), "$64,123.50");
        assert_eq!(coin.change_24h().unwrap().as_f64(), -1.25);
    }

    #[test]
    fn test_summary_tolerates_nulls() {
        let coin: CoinSummary = serde_json::from_value(json!({
            "id": "newcoin",
            "symbol": "new",
            "name": "New Coin",
            "current_price": null,
            "market_cap_rank": null
        }))
        .unwrap();
        assert_eq!(coin.price_label(), "N/A");
        assert_eq!(coin.rank_label(), "#-");
    }

    #[test]
    fn test_coin_info_extracts_description_and_links() {
        let resp: CoinInfoResponse = serde_json::from_value(json!({
            "id": "bitcoin",
            "name": "Bitcoin",
            "description": { "en": "Bitcoin is a cryptocurrency." },
            "links": {
                "homepage": ["http://www.bitcoin.org", "", ""],
                "twitter_screen_name": "bitcoin",
                "facebook_username": "bitcoin",
                "subreddit_url": "https://reddit.com/r/bitcoin"
            }
        }))
        .unwrap();

        let info = CoinInfo::from(resp);
        assert_eq!(info.description, "Bitcoin is a cryptocurrency.");
        assert_eq!(info.twitter.as_deref(), Some("bitcoin"));
        assert_eq!(info.facebook.as_deref(), Some("bitcoin"));
        assert_eq!(info.reddit.as_deref(), Some("https://reddit.com/r/bitcoin"));
        assert_eq!(info.social_links().len(), 4);
    }

    #[test]
    fn test_coin_info_drops_empty_links() {
        let resp: CoinInfoResponse = serde_json::from_value(json!({
            "id": "test_coin",
            "links": {
                "twitter_screen_name": "",
                "facebook_username": null,
                "subreddit_url": "https://reddit.com/r/test"
            }
        }))
        .unwrap();

        let info = CoinInfo::from(resp);
        assert_eq!(info.description, "");
        assert!(info.twitter.is_none());
        assert!(info.facebook.is_none());
        assert_eq!(info.social_links(), vec![("Reddit", "https://reddit.com/r/test".to_string())]);
    }
}
