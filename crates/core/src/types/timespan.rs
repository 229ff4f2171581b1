use serde::{Deserialize, Serialize};
use std::fmt;

/// History window for the market chart endpoint.
///
/// The API takes the number of days as a string, or `max` for the full
/// history of the coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timespan {
    #[default]
    #[serde(rename = "1")]
    Day,
    #[serde(rename = "7")]
    Week,
    #[serde(rename = "30")]
    Month,
    #[serde(rename = "90")]
    Quarter,
    #[serde(rename = "365")]
    Year,
    #[serde(rename = "max")]
    Max,
}

impl Timespan {
    pub const ALL: [Timespan; 6] = [
        Timespan::Day,
        Timespan::Week,
        Timespan::Month,
        Timespan::Quarter,
        Timespan::Year,
        Timespan::Max,
    ];

    /// Value sent as the `days` query parameter
    pub fn code(&self) -> &'static str {
        match self {
            Timespan::Day => "1",
            Timespan::Week => "7",
            Timespan::Month => "30",
            Timespan::Quarter => "90",
            Timespan::Year => "365",
            Timespan::Max => "max",
        }
    }

    /// Button caption
    pub fn label(&self) -> &'static str {
        match self {
            Timespan::Day => "24H",
            Timespan::Week => "7D",
            Timespan::Month => "30D",
            Timespan::Quarter => "90D",
            Timespan::Year => "1Y",
            Timespan::Max => "All",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Whether the chart axis should show time of day rather than dates
    pub fn is_intraday(&self) -> bool {
        matches!(self, Timespan::Day)
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
