//! UI-side state and the reducer that applies completions to it

use crate::request::{Completion, Payload, RequestKind};
use coinchart_core::{
    ChangeBadge, CoinInfo, CoinSummary, Error, GlobalMarket, PriceSeries, Timespan,
};
use tracing::{debug, info};

const LOADING: &str = "Loading...";

/// Error window contents
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDialog {
    pub title: String,
    pub message: String,
}

impl ErrorDialog {
    pub fn from_error(err: &Error) -> Self {
        Self {
            title: "Error".to_string(),
            message: err.user_message(),
        }
    }
}

/// Everything the window renders. Mutated only on the UI thread.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub selected: String,
    /// Span of the series on screen
    pub timespan: Timespan,
    /// Span requested but not yet delivered
    pub pending_timespan: Option<Timespan>,
    pub price_text: String,
    pub series: Option<PriceSeries>,
    pub badge: ChangeBadge,
    pub high_label: String,
    pub low_label: String,
    pub volume_label: String,
    pub coin_info: Option<CoinInfo>,
    pub global: Option<GlobalMarket>,
    pub coins: Vec<CoinSummary>,
    pub search: String,
    pub dialog: Option<ErrorDialog>,
    loading: [bool; RequestKind::COUNT],
}

impl ViewState {
    pub fn new(selected: &str) -> Self {
        Self {
            selected: selected.to_string(),
            timespan: Timespan::default(),
            pending_timespan: None,
            price_text: LOADING.to_string(),
            series: None,
            badge: ChangeBadge::from_change(None),
            high_label: "Highest: N/A".to_string(),
            low_label: "Lowest: N/A".to_string(),
            volume_label: "Total volume: N/A".to_string(),
            coin_info: None,
            global: None,
            coins: Vec::new(),
            search: String::new(),
            dialog: None,
            loading: [false; RequestKind::COUNT],
        }
    }

    pub fn is_loading(&self, kind: RequestKind) -> bool {
        self.loading[kind.index()]
    }

    pub fn mark_loading(&mut self, kind: RequestKind) {
        self.loading[kind.index()] = true;
    }

    pub fn clear_loading(&mut self) {
        self.loading = [false; RequestKind::COUNT];
    }

    /// Switch the selected coin and drop everything derived from the old one
    pub fn select(&mut self, coin_id: &str) {
        self.selected = coin_id.to_string();
        self.timespan = Timespan::default();
        self.pending_timespan = None;
        self.price_text = LOADING.to_string();
        self.clear_series();
        self.coin_info = None;
    }

    fn clear_series(&mut self) {
        self.series = None;
        self.badge = ChangeBadge::from_change(None);
        self.high_label = "Highest: N/A".to_string();
        self.low_label = "Lowest: N/A".to_string();
        self.volume_label = "Total volume: N/A".to_string();
    }

    /// Display name for the selected coin, falling back to the id
    pub fn selected_name(&self) -> String {
        self.coins
            .iter()
            .find(|c| c.id == self.selected)
            .map(|c| c.name.clone())
            .or_else(|| {
                self.coin_info
                    .as_ref()
                    .filter(|i| !i.name.is_empty())
                    .map(|i| i.name.clone())
            })
            .unwrap_or_else(|| capitalize(&self.selected))
    }

    /// Coins matching the search box
    pub fn filtered_coins(&self) -> Vec<&CoinSummary> {
        self.coins.iter().filter(|c| c.matches(&self.search)).collect()
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    /// Apply a completion that has already passed the generation check.
    ///
    /// Returns whether anything visible changed.
    pub fn apply(&mut self, completion: Completion) -> bool {
        let kind = completion.ticket.kind;
        self.loading[kind.index()] = false;

        if let Some(coin_id) = completion.request.coin_id() {
            if coin_id != self.selected {
                debug!("Ignoring {:?} for {} (selected {})", kind, coin_id, self.selected);
                return false;
            }
        }

        match completion.result {
            Ok(payload) => {
                self.apply_payload(payload);
                true
            }
            Err(err) => {
                match kind {
                    RequestKind::Price => self.price_text = "$N/A".to_string(),
                    RequestKind::Series => self.pending_timespan = None,
                    _ => {}
                }
                self.dialog = Some(ErrorDialog::from_error(&err));
                true
            }
        }
    }

    fn apply_payload(&mut self, payload: Payload) {
        match payload {
            Payload::Price { text, .. } => {
                self.price_text = format!("${}", text);
            }
            Payload::Series(series) => {
                info!(
                    "Chart updated: {} over {} ({} points)",
                    series.coin_id,
                    series.timespan,
                    series.len()
                );
                self.timespan = series.timespan;
                self.pending_timespan = None;
                self.badge = series.badge();
                self.high_label = series.high_label();
                self.low_label = series.low_label();
                self.volume_label = series.volume_label();
                self.series = Some(series);
            }
            Payload::CoinInfo(info) => {
                self.coin_info = Some(info);
            }
            Payload::Global(global) => {
                self.global = Some(global);
            }
            Payload::Markets(coins) => {
                info!("Coin list updated: {} coins", coins.len());
                self.coins = coins;
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{FetchRequest, Ticket};
    use coinchart_core::{MarketChartResponse, Sentiment, OVERLOADED_MESSAGE};
    use serde_json::json;

    fn ticket(kind: RequestKind) -> Ticket {
        Ticket { kind, generation: 1 }
    }

    fn series(coin: &str, prices: serde_json::Value) -> PriceSeries {
        serde_json::from_value::<MarketChartResponse>(json!({
            "prices": prices,
            "total_volumes": [[1622572800000u64, 1100]]
        }))
        .unwrap()
        .into_series(coin, Timespan::Week)
        .unwrap()
    }

    fn series_completion(coin: &str, result: coinchart_core::Result<Payload>) -> Completion {
        Completion {
            ticket: ticket(RequestKind::Series),
            request: FetchRequest::Series {
                coin_id: coin.to_string(),
                timespan: Timespan::Week,
            },
            result,
        }
    }

    #[test]
    fn test_series_updates_labels() {
        let mut view = ViewState::new("bitcoin");
        view.mark_loading(RequestKind::Series);

        let s = series("bitcoin", json!([[1622486400000u64, 40000], [1622572800000u64, 41000]]));
        assert!(view.apply(series_completion("bitcoin", Ok(Payload::Series(s)))));

        assert!(!view.is_loading(RequestKind::Series));
        assert_eq!(view.timespan, Timespan::Week);
        assert_eq!(view.high_label, "Highest: $41,000.00");
        assert_eq!(view.low_label, "Lowest: $40,000.00");
        assert_eq!(view.volume_label, "Total volume: $1,100.00");
        assert_eq!(view.badge.sentiment, Sentiment::Affirmative);
        assert!(view.badge.text.starts_with('↑'));
    }

    #[test]
    fn test_falling_series_uses_warning() {
        let mut view = ViewState::new("bitcoin");
        let s = series("bitcoin", json!([[1622486400000u64, 41000], [1622572800000u64, 40000]]));
        view.apply(series_completion("bitcoin", Ok(Payload::Series(s))));
        assert_eq!(view.badge.sentiment, Sentiment::Warning);
        assert!(view.badge.text.starts_with('↓'));
    }

    #[test]
    fn test_series_error_opens_dialog_and_keeps_chart() {
        let mut view = ViewState::new("bitcoin");
        let s = series("bitcoin", json!([[1622486400000u64, 40000], [1622572800000u64, 41000]]));
        view.apply(series_completion("bitcoin", Ok(Payload::Series(s.clone()))));

        assert!(view.apply(series_completion("bitcoin", Err(Error::MissingPrices))));

        let dialog = view.dialog.clone().unwrap();
        assert_eq!(dialog.message, OVERLOADED_MESSAGE);
        assert_eq!(view.series, Some(s));

        view.dismiss_dialog();
        assert!(view.dialog.is_none());
    }

    #[test]
    fn test_failed_span_change_keeps_displayed_span() {
        let mut view = ViewState::new("bitcoin");
        let s = series("bitcoin", json!([[1622486400000u64, 40000], [1622572800000u64, 41000]]));
        view.apply(series_completion("bitcoin", Ok(Payload::Series(s))));
        assert_eq!(view.timespan, Timespan::Week);

        view.pending_timespan = Some(Timespan::Year);
        view.apply(Completion {
            ticket: ticket(RequestKind::Series),
            request: FetchRequest::Series {
                coin_id: "bitcoin".to_string(),
                timespan: Timespan::Year,
            },
            result: Err(Error::MissingPrices),
        });

        assert!(view.dialog.is_some());
        assert_eq!(view.pending_timespan, None);
        assert_eq!(view.timespan, Timespan::Week);
        assert_eq!(view.series.as_ref().unwrap().timespan, view.timespan);
    }

    #[test]
    fn test_price_text() {
        let mut view = ViewState::new("bitcoin");
        let ok = Completion {
            ticket: ticket(RequestKind::Price),
            request: FetchRequest::Price { coin_id: "bitcoin".into() },
            result: Ok(Payload::Price { coin_id: "bitcoin".into(), text: "50000".into() }),
        };
        view.apply(ok);
        assert_eq!(view.price_text, "$50000");

        let failed = Completion {
            ticket: ticket(RequestKind::Price),
            request: FetchRequest::Price { coin_id: "bitcoin".into() },
            result: Err(Error::NetworkError("timed out".into())),
        };
        view.apply(failed);
        assert_eq!(view.price_text, "$N/A");
        assert!(view.dialog.is_some());
    }

    #[test]
    fn test_result_for_other_coin_is_ignored() {
        let mut view = ViewState::new("ethereum");
        let s = series("bitcoin", json!([[1622486400000u64, 1.0]]));
        assert!(!view.apply(series_completion("bitcoin", Ok(Payload::Series(s)))));
        assert!(view.series.is_none());
    }

    #[test]
    fn test_select_resets_coin_state() {
        let mut view = ViewState::new("bitcoin");
        let s = series("bitcoin", json!([[1622486400000u64, 1.0], [1622572800000u64, 2.0]]));
        view.apply(series_completion("bitcoin", Ok(Payload::Series(s))));
        view.price_text = "$2".into();

        view.select("ethereum");
        assert_eq!(view.selected, "ethereum");
        assert_eq!(view.timespan, Timespan::Day);
        assert!(view.series.is_none());
        assert_eq!(view.badge.text, "Change: N/A");
        assert_eq!(view.price_text, "Loading...");
    }

    #[test]
    fn test_search_filters_coins() {
        let mut view = ViewState::new("bitcoin");
        let coins: Vec<CoinSummary> = serde_json::from_value(json!([
            { "id": "bitcoin", "symbol": "btc", "name": "Bitcoin" },
            { "id": "ethereum", "symbol": "eth", "name": "Ethereum" },
            { "id": "wrapped-bitcoin", "symbol": "wbtc", "name": "Wrapped Bitcoin" }
        ]))
        .unwrap();
        view.apply(Completion {
            ticket: ticket(RequestKind::Markets),
            request: FetchRequest::Markets,
            result: Ok(Payload::Markets(coins)),
        });

        assert_eq!(view.filtered_coins().len(), 3);
        view.search = "btc".into();
        let ids: Vec<_> = view.filtered_coins().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "wrapped-bitcoin"]);
        assert_eq!(view.selected_name(), "Bitcoin");
    }

    #[test]
    fn test_selected_name_falls_back_to_id() {
        let view = ViewState::new("ethereum");
        assert_eq!(view.selected_name(), "Ethereum");
    }
}
