//! Runs fetches on the tokio runtime and posts completions to the UI channel

use crate::request::{Completion, FetchRequest, Generations, RequestKind, Ticket};
use coinchart_networking::MarketSource;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Called after a completion is queued so an idle UI loop wakes up
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Owns the worker side of the fetch-off-thread pattern.
///
/// Lives on the UI thread. Each dispatch spawns one task; a new request of a
/// kind aborts the previous task of that kind and bumps its generation.
pub struct FetchDispatcher {
    source: Arc<dyn MarketSource>,
    runtime: Handle,
    tx: mpsc::UnboundedSender<Completion>,
    generations: Generations,
    in_flight: [Option<JoinHandle<()>>; RequestKind::COUNT],
    waker: Option<Waker>,
}

impl FetchDispatcher {
    pub fn new(
        source: Arc<dyn MarketSource>,
        runtime: Handle,
        tx: mpsc::UnboundedSender<Completion>,
    ) -> Self {
        Self {
            source,
            runtime,
            tx,
            generations: Generations::default(),
            in_flight: Default::default(),
            waker: None,
        }
    }

    pub fn set_waker(&mut self, waker: Waker) {
        self.waker = Some(waker);
    }

    /// Spawn `request` on a worker and return its ticket
    pub fn dispatch(&mut self, request: FetchRequest) -> Ticket {
        let kind = request.kind();
        let ticket = self.generations.next(kind);

        if let Some(previous) = self.in_flight[kind.index()].take() {
            if !previous.is_finished() {
                debug!("Aborting superseded {:?} fetch", kind);
                previous.abort();
            }
        }

        info!(
            "Dispatching {:?} fetch (generation {}) {:?}",
            kind, ticket.generation, request
        );

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let waker = self.waker.clone();

        let handle = self.runtime.spawn(async move {
            let result = request.execute(source.as_ref()).await;

            if let Err(e) = &result {
                error!("{:?} fetch failed: {}", ticket.kind, e);
            }

            if tx.send(Completion { ticket, request, result }).is_err() {
                debug!("Completion receiver dropped; discarding {:?}", ticket);
                return;
            }

            if let Some(wake) = waker {
                wake();
            }
        });

        self.in_flight[kind.index()] = Some(handle);
        ticket
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generations.is_current(ticket)
    }

    pub fn latest_generation(&self, kind: RequestKind) -> u64 {
        self.generations.latest(kind)
    }

    /// Number of fetches still running
    pub fn in_flight(&self) -> usize {
        self.in_flight
            .iter()
            .flatten()
            .filter(|h| !h.is_finished())
            .count()
    }

    /// Abort every running fetch. Their tickets become stale.
    pub fn cancel_all(&mut self) {
        for (index, slot) in self.in_flight.iter_mut().enumerate() {
            if let Some(handle) = slot.take() {
                if !handle.is_finished() {
                    debug!("Cancelling fetch in slot {}", index);
                    handle.abort();
                }
            }
        }
        for kind in [
            RequestKind::Price,
            RequestKind::Series,
            RequestKind::CoinInfo,
            RequestKind::Global,
            RequestKind::Markets,
        ] {
            self.generations.next(kind);
        }
    }
}

impl Drop for FetchDispatcher {
    fn drop(&mut self) {
        for handle in self.in_flight.iter().flatten() {
            handle.abort();
        }
    }
}
