//! Response validation, kept apart from the transport so it can be tested
//! against canned bodies.

use coinchart_core::{Error, MarketChartResponse, PriceSeries, Result, Timespan};
use serde::de::DeserializeOwned;
use tracing::error;

const BODY_PREVIEW: usize = 300;

fn preview(body: &str) -> &str {
    let mut end = body.len().min(BODY_PREVIEW);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Map a non-success status to an error. 429 gets its own variant.
pub fn check_status(status: u16, body: &str) -> Result<()> {
    match status {
        200..=299 => Ok(()),
        429 => Err(Error::RateLimited),
        _ => Err(Error::ApiError {
            status,
            body: preview(body).to_string(),
        }),
    }
}

/// Decode a JSON body after checking the status
pub fn decode_json<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    check_status(status, body)?;
    serde_json::from_str(body).map_err(|e| {
        error!("Failed to parse response: {}. Body preview: {}", e, preview(body));
        Error::InvalidData(e.to_string())
    })
}

/// Decode a market chart body into a series.
///
/// The range-limit refusal arrives with a non-success status, so the body is
/// inspected before the status is turned into a generic error.
pub fn decode_market_chart(
    status: u16,
    body: &str,
    coin_id: &str,
    timespan: Timespan,
) -> Result<PriceSeries> {
    if status == 429 {
        return Err(Error::RateLimited);
    }

    let parsed: std::result::Result<MarketChartResponse, _> = serde_json::from_str(body);

    match parsed {
        Ok(chart) if (200..300).contains(&status) => chart.into_series(coin_id, timespan),
        Ok(chart) => match chart.into_series(coin_id, timespan) {
            Err(err @ Error::HistoricalRangeExceeded(_)) => Err(err),
            _ => check_status(status, body).and(Err(Error::MissingPrices)),
        },
        Err(e) => {
            check_status(status, body)?;
            error!("Failed to parse market chart: {}. Body preview: {}", e, preview(body));
            Err(Error::InvalidData(e.to_string()))
        }
    }
}

/// Reject ids that would escape the `/coins/{id}` path segment
pub fn validate_coin_id(coin_id: &str) -> Result<&str> {
    let id = coin_id.trim();
    let valid = !id.is_empty()
        && !id.chars().all(|c| c == '.')
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(id)
    } else {
        Err(Error::UnknownCoin(coin_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinchart_core::{CoinSummary, SimplePriceResponse};

    #[test]
    fn test_check_status() {
        assert!(check_status(200, "").is_ok());
        assert!(matches!(check_status(429, ""), Err(Error::RateLimited)));
        match check_status(500, "boom") {
            Err(Error::ApiError { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_decode_price() {
        let resp: SimplePriceResponse =
            decode_json(200, r#"{"bitcoin":{"usd":50000}}"#).unwrap();
        assert_eq!(resp.price_text("bitcoin"), "50000");
    }

    #[test]
    fn test_decode_markets() {
        let body = r#"[
            {"id":"bitcoin","symbol":"btc","name":"Bitcoin","market_cap_rank":1,"current_price":64000.0,"price_change_percentage_24h":1.5},
            {"id":"ethereum","symbol":"eth","name":"Ethereum","market_cap_rank":2,"current_price":3100.0,"price_change_percentage_24h":-0.7}
        ]"#;
        let coins: Vec<CoinSummary> = decode_json(200, body).unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[1].id, "ethereum");
    }

    #[test]
    fn test_decode_garbage_is_invalid_data() {
        let err = decode_json::<SimplePriceResponse>(200, "<html>").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_chart_ok() {
        let body = r#"{"prices":[[1622486400000,40000],[1622572800000,41000]],"total_volumes":[[1622572800000,1100]]}"#;
        let series = decode_market_chart(200, body, "bitcoin", Timespan::Day).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.total_volume, Some(1100.0));
    }

    #[test]
    fn test_chart_missing_prices() {
        let err = decode_market_chart(200, "{}", "bitcoin", Timespan::Day).unwrap_err();
        assert!(matches!(err, Error::MissingPrices));
    }

    #[test]
    fn test_chart_range_limit_on_401() {
        let body = r#"{"error":{"status":{"timestamp":"2024-06-01T00:00:00.000+00:00","error_code":10012,"error_message":"Your request exceeds the allowed time range."}}}"#;
        let err = decode_market_chart(401, body, "bitcoin", Timespan::Max).unwrap_err();
        assert!(matches!(err, Error::HistoricalRangeExceeded(_)));
    }

    #[test]
    fn test_chart_server_error() {
        let err = decode_market_chart(503, "Service Unavailable", "bitcoin", Timespan::Day)
            .unwrap_err();
        assert!(matches!(err, Error::ApiError { status: 503, .. }));

        let err = decode_market_chart(500, r#"{"error":"oops"}"#, "bitcoin", Timespan::Day)
            .unwrap_err();
        assert!(matches!(err, Error::ApiError { status: 500, .. }));
    }

    #[test]
    fn test_chart_rate_limited() {
        let err = decode_market_chart(429, "{}", "bitcoin", Timespan::Day).unwrap_err();
        assert!(matches!(err, Error::RateLimited));
    }

    #[test]
    fn test_validate_coin_id() {
        assert_eq!(validate_coin_id(" bitcoin ").unwrap(), "bitcoin");
        assert!(validate_coin_id("usd-coin").is_ok());
        assert!(validate_coin_id("").is_err());
        assert!(validate_coin_id("../global").is_err());
        assert!(validate_coin_id("bit coin").is_err());
        assert!(validate_coin_id(".").is_err());
        assert!(validate_coin_id("..").is_err());
        assert!(validate_coin_id("wrapped.eth").is_ok());
    }
}
