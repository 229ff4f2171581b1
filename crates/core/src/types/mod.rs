//! Shared type definitions and newtypes

mod timespan;

pub use timespan::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// USD amount (for clarity in function signatures)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Usd(pub f64);

impl Usd {
    pub fn new(amount: f64) -> Self {
        Usd(amount)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// `$1,234,567.89` style rendering
    pub fn grouped(&self) -> String {
        format_usd_grouped(self.0)
    }
}

impl fmt::Display for Usd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.grouped())
    }
}

/// Percentage value (e.g., 24h change)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Percent(pub f64);

impl Percent {
    pub fn new(value: f64) -> Self {
        Percent(value)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// Percent change from `first` to `last`, `None` when `first` is zero
    pub fn change_between(first: f64, last: f64) -> Option<Self> {
        if first == 0.0 {
            return None;
        }
        Some(Percent(((last - first) / first) * 100.0))
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

/// Format a USD value with thousands separators and two decimals.
pub fn format_usd_grouped(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.004 rounds to 0.00; don't print "-$0.00"
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_formatting() {
        assert_eq!(format_usd_grouped(1_000_000_000.0), "$1,000,000,000.00");
        assert_eq!(format_usd_grouped(2_000_000_000_000.0), "$2,000,000,000,000.00");
        assert_eq!(format_usd_grouped(999.5), "$999.50");
        assert_eq!(format_usd_grouped(0.0), "$0.00");
        assert_eq!(format_usd_grouped(-1234.5), "-$1,234.50");
        assert_eq!(format_usd_grouped(-0.001), "$0.00");
    }

    #[test]
    fn test_non_finite_is_na() {
        assert_eq!(format_usd_grouped(f64::NAN), "N/A");
    }

    #[test]
    fn test_change_between() {
        let pct = Percent::change_between(40000.0, 41000.0).unwrap();
        assert!((pct.as_f64() - 2.5).abs() < 1e-9);
        assert!(pct.is_positive());
        assert!(!Percent::new(0.0).is_positive());
        assert!(Percent::change_between(0.0, 10.0).is_none());
        assert_eq!(Percent::new(-1.234).to_string(), "-1.23%");
    }
}
