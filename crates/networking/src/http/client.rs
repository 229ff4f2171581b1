//! CoinGecko HTTP client

use super::decode::{decode_json, decode_market_chart, validate_coin_id};
use coinchart_core::{
    CoinInfo, CoinInfoResponse, CoinSummary, Error, GlobalMarket, GlobalResponse, PriceSeries,
    Result, SimplePriceResponse, Timespan,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api";
const USER_AGENT_VALUE: &str = concat!("coinchart/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`CoinGeckoClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Vendor root, without the `/v3` suffix
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Page size for the markets listing
    pub per_page: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: USER_AGENT_VALUE.to_string(),
            per_page: 100,
        }
    }
}

/// HTTP client for the public CoinGecko v3 API
///
/// Unauthenticated; every call is a single GET with no retry.
#[derive(Clone)]
pub struct CoinGeckoClient {
    http: Client,
    config: ClientConfig,
}

impl CoinGeckoClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(Self::default_headers())
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::ConfigError(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v3/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Send a GET and return the status code with the raw body
    async fn get_raw(&self, url: &str, query: &[(&str, &str)]) -> Result<(u16, String)> {
        debug!("GET {} {:?}", url, query);

        let response = self.http.get(url).query(query).send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            Error::NetworkError(e.to_string())
        })?;

        let status = response.status().as_u16();
        debug!("Response status: {}", status);

        let body = response.text().await.map_err(|e| {
            error!("Failed to read response body from {}: {}", url, e);
            Error::NetworkError(e.to_string())
        })?;

        Ok((status, body))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let (status, body) = self.get_raw(url, query).await?;
        decode_json(status, &body)
    }

    /// Get the raw simple/price response for one coin
    #[instrument(skip(self))]
    pub async fn get_simple_price(&self, coin_id: &str) -> Result<SimplePriceResponse> {
        let id = validate_coin_id(coin_id)?;
        let url = self.endpoint("simple/price");
        self.get_json(&url, &[("ids", id), ("vs_currencies", "usd")])
            .await
    }

    /// Current USD price as text, `N/A` when the API doesn't know the coin
    #[instrument(skip(self))]
    pub async fn get_price(&self, coin_id: &str) -> Result<String> {
        let prices = self.get_simple_price(coin_id).await?;
        let text = prices.price_text(coin_id.trim());
        if text == "N/A" {
            error!("'{}' not found in price response", coin_id);
        } else {
            debug!("Price fetched: {} @ ${}", coin_id, text);
        }
        Ok(text)
    }

    /// Price history for one coin over the given timespan
    #[instrument(skip(self))]
    pub async fn get_market_chart(&self, coin_id: &str, timespan: Timespan) -> Result<PriceSeries> {
        let id = validate_coin_id(coin_id)?;
        let url = self.endpoint(&format!("coins/{}/market_chart", id));

        let (status, body) = self
            .get_raw(&url, &[("vs_currency", "usd"), ("days", timespan.code())])
            .await?;

        let series = decode_market_chart(status, &body, id, timespan)
            .map_err(|e| not_found_as_unknown(e, id))?;

        debug!(
            "Market chart fetched: {} over {}, {} points",
            id,
            timespan.code(),
            series.len()
        );
        Ok(series)
    }

    /// Description and social links
    #[instrument(skip(self))]
    pub async fn get_coin_info(&self, coin_id: &str) -> Result<CoinInfo> {
        let id = validate_coin_id(coin_id)?;
        let url = self.endpoint(&format!("coins/{}", id));

        let resp: CoinInfoResponse = self
            .get_json(
                &url,
                &[
                    ("localization", "false"),
                    ("tickers", "false"),
                    ("market_data", "false"),
                    ("community_data", "false"),
                    ("developer_data", "false"),
                ],
            )
            .await
            .map_err(|e| not_found_as_unknown(e, id))?;

        let info = CoinInfo::from(resp);
        debug!(
            "Coin info fetched: {} ({} chars of description)",
            id,
            info.description.len()
        );
        Ok(info)
    }

    /// Aggregate market totals
    #[instrument(skip(self))]
    pub async fn get_global(&self) -> Result<GlobalMarket> {
        let url = self.endpoint("global");
        let resp: GlobalResponse = self.get_json(&url, &[]).await?;
        Ok(GlobalMarket::from(resp))
    }

    /// First page of coins ordered by market cap
    #[instrument(skip(self))]
    pub async fn get_markets(&self) -> Result<Vec<CoinSummary>> {
        let url = self.endpoint("coins/markets");
        let per_page = self.config.per_page.to_string();

        let coins: Vec<CoinSummary> = self
            .get_json(
                &url,
                &[
                    ("vs_currency", "usd"),
                    ("order", "market_cap_desc"),
                    ("per_page", per_page.as_str()),
                    ("page", "1"),
                ],
            )
            .await?;

        debug!("Markets fetched: {} coins", coins.len());
        Ok(coins)
    }
}

fn not_found_as_unknown(err: Error, coin_id: &str) -> Error {
    match err {
        Error::ApiError { status: 404, .. } => Error::UnknownCoin(coin_id.to_string()),
        other => other,
    }
}
