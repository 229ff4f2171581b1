//! Request objects and the completions that come back from workers

use coinchart_core::{CoinInfo, CoinSummary, GlobalMarket, PriceSeries, Result, Timespan};
use coinchart_networking::MarketSource;

/// One slot per kind of fetch. A newer request of a kind supersedes older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Price,
    Series,
    CoinInfo,
    Global,
    Markets,
}

impl RequestKind {
    pub const COUNT: usize = 5;

    pub fn index(self) -> usize {
        match self {
            RequestKind::Price => 0,
            RequestKind::Series => 1,
            RequestKind::CoinInfo => 2,
            RequestKind::Global => 3,
            RequestKind::Markets => 4,
        }
    }
}

/// Identifies a dispatched request. Only the latest generation of a kind
/// may touch the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub kind: RequestKind,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Price { coin_id: String },
    Series { coin_id: String, timespan: Timespan },
    CoinInfo { coin_id: String },
    Global,
    Markets,
}

impl FetchRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            FetchRequest::Price { .. } => RequestKind::Price,
            FetchRequest::Series { .. } => RequestKind::Series,
            FetchRequest::CoinInfo { .. } => RequestKind::CoinInfo,
            FetchRequest::Global => RequestKind::Global,
            FetchRequest::Markets => RequestKind::Markets,
        }
    }

    pub fn coin_id(&self) -> Option<&str> {
        match self {
            FetchRequest::Price { coin_id }
            | FetchRequest::Series { coin_id, .. }
            | FetchRequest::CoinInfo { coin_id } => Some(coin_id.as_str()),
            FetchRequest::Global | FetchRequest::Markets => None,
        }
    }

    /// Run the request against a source. Executes on a worker task.
    pub async fn execute(&self, source: &dyn MarketSource) -> Result<Payload> {
        match self {
            FetchRequest::Price { coin_id } => source
                .price(coin_id)
                .await
                .map(|text| Payload::Price { coin_id: coin_id.clone(), text }),
            FetchRequest::Series { coin_id, timespan } => {
                source.series(coin_id, *timespan).await.map(Payload::Series)
            }
            FetchRequest::CoinInfo { coin_id } => {
                source.coin_info(coin_id).await.map(Payload::CoinInfo)
            }
            FetchRequest::Global => source.global().await.map(Payload::Global),
            FetchRequest::Markets => source.markets().await.map(Payload::Markets),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Payload {
    Price { coin_id: String, text: String },
    Series(PriceSeries),
    CoinInfo(CoinInfo),
    Global(GlobalMarket),
    Markets(Vec<CoinSummary>),
}

/// Message sent from a worker back to the UI thread
#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub request: FetchRequest,
    pub result: Result<Payload>,
}

/// Latest generation issued per request kind
#[derive(Debug, Clone, Default)]
pub struct Generations {
    latest: [u64; RequestKind::COUNT],
}

impl Generations {
    /// Issue the next ticket for `kind`
    pub fn next(&mut self, kind: RequestKind) -> Ticket {
        let slot = &mut self.latest[kind.index()];
        *slot += 1;
        Ticket {
            kind,
            generation: *slot,
        }
    }

    pub fn latest(&self, kind: RequestKind) -> u64 {
        self.latest[kind.index()]
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation != 0 && self.latest(ticket.kind) == ticket.generation
    }
}
