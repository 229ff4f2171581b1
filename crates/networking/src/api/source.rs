//! Market data seam implemented by the HTTP client

use crate::CoinGeckoClient;
use async_trait::async_trait;
use coinchart_core::{CoinInfo, CoinSummary, GlobalMarket, PriceSeries, Result, Timespan};

/// Everything the UI can ask the vendor for
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Current USD price as text, `N/A` when unknown
    async fn price(&self, coin_id: &str) -> Result<String>;

    async fn series(&self, coin_id: &str, timespan: Timespan) -> Result<PriceSeries>;

    async fn coin_info(&self, coin_id: &str) -> Result<CoinInfo>;

    async fn global(&self) -> Result<GlobalMarket>;

    async fn markets(&self) -> Result<Vec<CoinSummary>>;
}

#[async_trait]
impl MarketSource for CoinGeckoClient {
    async fn price(&self, coin_id: &str) -> Result<String> {
        self.get_price(coin_id).await
    }

    async fn series(&self, coin_id: &str, timespan: Timespan) -> Result<PriceSeries> {
        self.get_market_chart(coin_id, timespan).await
    }

    async fn coin_info(&self, coin_id: &str) -> Result<CoinInfo> {
        self.get_coin_info(coin_id).await
    }

    async fn global(&self) -> Result<GlobalMarket> {
        self.get_global().await
    }

    async fn markets(&self) -> Result<Vec<CoinSummary>> {
        self.get_markets().await
    }
}
