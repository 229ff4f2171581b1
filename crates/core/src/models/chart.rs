//! Market chart models and the derived price series

use crate::errors::{Error, Result};
use crate::types::{format_usd_grouped, Percent, Timespan};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error code the API uses for ranges outside the public plan
pub const RANGE_LIMIT_ERROR_CODE: i64 = 10012;

/// Raw response from /coins/{id}/market_chart
///
/// Every field is optional: an overloaded or rate-limited API answers with an
/// error object instead of the arrays, and that has to be told apart from a
/// malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Option<Vec<ChartPoint>>,
    #[serde(default)]
    pub market_caps: Option<Vec<ChartPoint>>,
    #[serde(default)]
    pub total_volumes: Option<Vec<ChartPoint>>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
    #[serde(default)]
    pub status: Option<ApiErrorStatus>,
}

/// `[ms_timestamp, value]` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint(pub f64, pub f64);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorBody {
    Status { status: ApiErrorStatus },
    Message(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorStatus {
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl MarketChartResponse {
    fn error_status(&self) -> Option<&ApiErrorStatus> {
        match &self.error {
            Some(ApiErrorBody::Status { status }) => Some(status),
            _ => self.status.as_ref(),
        }
    }

    /// Validate the response and build the series for `coin_id`.
    pub fn into_series(self, coin_id: &str, timespan: Timespan) -> Result<PriceSeries> {
        if let Some(status) = self.error_status() {
            if status.error_code == Some(RANGE_LIMIT_ERROR_CODE) {
                return Err(Error::HistoricalRangeExceeded(
                    status.error_message.clone().unwrap_or_default(),
                ));
            }
        }

        let prices = self.prices.ok_or(Error::MissingPrices)?;

        let points = prices
            .into_iter()
            .map(|ChartPoint(ms, price)| -> Result<PricePoint> {
                let timestamp = DateTime::<Utc>::from_timestamp_millis(ms as i64).ok_or_else(
                    || Error::InvalidData(format!("timestamp out of range: {}", ms)),
                )?;
                Ok(PricePoint { timestamp, price })
            })
            .collect::<Result<Vec<_>>>()?;

        let total_volume = self
            .total_volumes
            .and_then(|v| v.last().map(|ChartPoint(_, vol)| *vol));

        Ok(PriceSeries {
            coin_id: coin_id.to_string(),
            timespan,
            points,
            total_volume,
        })
    }
}

/// Chart data point with timestamp and price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Full price history for one coin and timespan.
///
/// Rebuilt from scratch on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub coin_id: String,
    pub timespan: Timespan,
    pub points: Vec<PricePoint>,
    pub total_volume: Option<f64>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn highest(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.price)
            .reduce(f64::max)
    }

    pub fn lowest(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.price)
            .reduce(f64::min)
    }

    /// Percent change between the first and last points
    pub fn change(&self) -> Option<Percent> {
        if self.points.len() < 2 {
            return None;
        }
        let first = self.points.first()?.price;
        let last = self.points.last()?.price;
        Percent::change_between(first, last)
    }

    pub fn badge(&self) -> ChangeBadge {
        ChangeBadge::from_change(self.change())
    }

    /// `[unix_seconds, price]` pairs for plotting
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .map(|p| [p.timestamp.timestamp_millis() as f64 / 1000.0, p.price])
            .collect()
    }

    pub fn high_label(&self) -> String {
        format!("Highest: {}", usd_or_na(self.highest()))
    }

    pub fn low_label(&self) -> String {
        format!("Lowest: {}", usd_or_na(self.lowest()))
    }

    pub fn volume_label(&self) -> String {
        format!("Total volume: {}", usd_or_na(self.total_volume))
    }
}

fn usd_or_na(value: Option<f64>) -> String {
    value
        .map(format_usd_grouped)
        .unwrap_or_else(|| "N/A".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
        }
    }
}

/// Styling class for a change value; the GUI maps these to colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Affirmative,
    Warning,
    Neutral,
}

impl Sentiment {
    /// Only a strict rise is affirmative; a flat series reads as a fall.
    pub fn for_change(change: Percent) -> Self {
        if change.is_positive() {
            Sentiment::Affirmative
        } else {
            Sentiment::Warning
        }
    }
}

/// Rendered percent-change indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeBadge {
    pub change: Option<Percent>,
    pub direction: Option<Direction>,
    pub sentiment: Sentiment,
    pub text: String,
}

impl ChangeBadge {
    pub fn from_change(change: Option<Percent>) -> Self {
        match change {
            Some(pct) => {
                let sentiment = Sentiment::for_change(pct);
                let direction = if sentiment == Sentiment::Affirmative {
                    Direction::Up
                } else {
                    Direction::Down
                };
                Self {
                    change: Some(pct),
                    direction: Some(direction),
                    sentiment,
                    text: format!("{} {}", direction.arrow(), pct),
                }
            }
            None => Self {
                change: None,
                direction: None,
                sentiment: Sentiment::Neutral,
                text: "Change: N/A".to_string(),
            },
        }
    }
}
