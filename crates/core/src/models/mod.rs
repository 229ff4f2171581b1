//! Data models for CoinGecko entities

mod chart;
mod coin;
mod market;

pub use chart::*;
pub use coin::*;
pub use market::*;
