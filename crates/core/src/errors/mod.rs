//! Error types and Result alias for coinchart

use thiserror::Error;

/// Shown when the chart response came back without a `prices` array.
pub const OVERLOADED_MESSAGE: &str = "Server is overloaded. Try again later.";

/// Shown when the public API refuses a range beyond its history limit.
pub const RANGE_LIMIT_MESSAGE: &str = "Your request exceeds the allowed time range. \
Public API users are limited to querying historical data within the past 365 days. \
Upgrade to a paid plan to enjoy full historical data access: \
https://www.coingecko.com/en/api/pricing.";

/// Main error type for coinchart
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API request failed with status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Rate limited by the API")]
    RateLimited,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Response did not contain price data")]
    MissingPrices,

    #[error("Requested range exceeds the historical data limit: {0}")]
    HistoricalRangeExceeded(String),

    #[error("Unknown coin: {0}")]
    UnknownCoin(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Text for the error dialog.
    ///
    /// The two recognised chart failures get their fixed explanations; anything
    /// else falls back to the overload message with the detail underneath.
    pub fn user_message(&self) -> String {
        match self {
            Error::MissingPrices => OVERLOADED_MESSAGE.to_string(),
            Error::HistoricalRangeExceeded(_) => RANGE_LIMIT_MESSAGE.to_string(),
            other => format!("{}\n{}", OVERLOADED_MESSAGE, other),
        }
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}
