//! View state consumed by the window

mod state;

pub use state::*;
