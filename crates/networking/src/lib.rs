//! Coinchart Networking - CoinGecko HTTP client and the market data seam

pub mod api;
pub mod http;

pub use api::MarketSource;
pub use http::{ClientConfig, CoinGeckoClient};
