//! UI-thread controller: turns user actions into fetches and applies results

use crate::executor::{FetchDispatcher, Waker};
use crate::request::{Completion, FetchRequest, RequestKind, Ticket};
use crate::view::ViewState;
use coinchart_core::Timespan;
use coinchart_networking::MarketSource;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Owns the view state, the dispatcher and the receiving end of the
/// completion channel.
pub struct Session {
    dispatcher: FetchDispatcher,
    rx: mpsc::UnboundedReceiver<Completion>,
    view: ViewState,
}

impl Session {
    pub fn new(source: Arc<dyn MarketSource>, runtime: Handle, default_coin: &str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            dispatcher: FetchDispatcher::new(source, runtime, tx),
            rx,
            view: ViewState::new(default_coin),
        }
    }

    pub fn set_waker(&mut self, waker: Waker) {
        self.dispatcher.set_waker(waker);
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn search_mut(&mut self) -> &mut String {
        &mut self.view.search
    }

    pub fn dismiss_dialog(&mut self) {
        self.view.dismiss_dialog();
    }

    pub fn in_flight(&self) -> usize {
        self.dispatcher.in_flight()
    }

    fn dispatch(&mut self, request: FetchRequest) -> Ticket {
        self.view.mark_loading(request.kind());
        self.dispatcher.dispatch(request)
    }

    /// Fetch the market chart for `coin_id` over `timespan`
    pub fn request_series(&mut self, coin_id: &str, timespan: Timespan) -> Ticket {
        self.dispatch(FetchRequest::Series {
            coin_id: coin_id.to_string(),
            timespan,
        })
    }

    pub fn request_price(&mut self, coin_id: &str) -> Ticket {
        self.dispatch(FetchRequest::Price {
            coin_id: coin_id.to_string(),
        })
    }

    pub fn request_coin_info(&mut self, coin_id: &str) -> Ticket {
        self.dispatch(FetchRequest::CoinInfo {
            coin_id: coin_id.to_string(),
        })
    }

    pub fn request_global(&mut self) -> Ticket {
        self.dispatch(FetchRequest::Global)
    }

    pub fn request_markets(&mut self) -> Ticket {
        self.dispatch(FetchRequest::Markets)
    }

    /// Change the chart window for the selected coin. The displayed span only
    /// changes once the new series arrives.
    pub fn select_timespan(&mut self, timespan: Timespan) -> Ticket {
        self.view.pending_timespan = Some(timespan);
        let coin = self.view.selected.clone();
        self.request_series(&coin, timespan)
    }

    /// Switch coins: price, description and a 24H chart are refetched
    pub fn select_currency(&mut self, coin_id: &str) {
        info!("Selected currency: {}", coin_id);
        self.view.select(coin_id);
        self.request_price(coin_id);
        self.request_coin_info(coin_id);
        self.request_series(coin_id, Timespan::default());
    }

    /// Refetch everything the window shows
    pub fn refresh_all(&mut self) {
        let coin = self.view.selected.clone();
        let timespan = self.view.timespan;
        self.request_global();
        self.request_markets();
        self.request_price(&coin);
        self.request_coin_info(&coin);
        self.request_series(&coin, timespan);
    }

    /// Apply one completion if it is still the latest of its kind
    pub fn apply(&mut self, completion: Completion) -> bool {
        if !self.dispatcher.is_current(completion.ticket) {
            warn!(
                "Discarding stale {:?} completion (generation {}, latest {})",
                completion.ticket.kind,
                completion.ticket.generation,
                self.dispatcher.latest_generation(completion.ticket.kind)
            );
            return false;
        }
        self.view.apply(completion)
    }

    /// Drain the channel without blocking. Called once per frame.
    ///
    /// Returns the number of completions that changed the view.
    pub fn pump(&mut self) -> usize {
        let mut changed = 0;
        while let Ok(completion) = self.rx.try_recv() {
            if self.apply(completion) {
                changed += 1;
            }
        }
        changed
    }

    /// Wait for the next completion and apply it. `None` once the channel closes.
    pub async fn apply_next(&mut self) -> Option<bool> {
        let completion = self.rx.recv().await?;
        Some(self.apply(completion))
    }

    pub fn is_loading(&self, kind: RequestKind) -> bool {
        self.view.is_loading(kind)
    }

    /// Abort running fetches; their results will never be applied
    pub fn cancel_all(&mut self) {
        self.dispatcher.cancel_all();
        self.view.clear_loading();
    }
}
