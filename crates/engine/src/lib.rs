//! Coinchart Engine - fetch-off-thread, render-on-UI-thread
//!
//! User actions become [`FetchRequest`]s that run on the tokio runtime. Each
//! result comes back over a channel as a [`Completion`] tagged with a
//! generation; the UI loop drains the channel and only the newest completion
//! of each kind reaches the [`ViewState`].

pub mod executor;
pub mod request;
pub mod session;
pub mod view;

pub use executor::{FetchDispatcher, Waker};
pub use request::{Completion, FetchRequest, Payload, RequestKind, Ticket};
pub use session::Session;
pub use view::{ErrorDialog, ViewState};
